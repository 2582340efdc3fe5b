//! The service manager: name-keyed resolution of services
//!
//! Resolution of `get(name)`:
//!
//! 1. an instance cached under exactly `name` is returned as is;
//! 2. `name` is resolved through the alias table (one hop);
//! 3. for an alias whose own shared flag is unset or `true`, an instance
//!    already cached under the target is reused and cached under the alias;
//! 4. otherwise the factory builds a new instance, which is cached under the
//!    target and under the alias as their shared flags independently allow.
//!
//! `build` always creates a fresh instance and never touches the cache.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::alias::AliasTable;
use crate::config::ServiceManagerConfig;
use crate::error::{EntryKind, ServiceError, ServiceResult};
use crate::factory::{Factory, FactoryEntry};
use crate::gate::OverrideMode;
use crate::locator::{Options, Service, ServiceLocator};
use crate::registry::FactoryRegistry;
use crate::shared::SharedPolicy;
use crate::types::TypeRegistry;

/// Name-keyed service container
pub struct ServiceManager {
    services: RwLock<BTreeMap<String, Service>>,
    aliases: RwLock<AliasTable>,
    factories: RwLock<FactoryRegistry>,
    shared: RwLock<SharedPolicy>,
    mode: RwLock<OverrideMode>,
    creation_context: Option<Arc<dyn ServiceLocator>>,
}

impl ServiceManager {
    /// Create a manager over the discovered type registry
    pub fn new(config: ServiceManagerConfig, mode: OverrideMode) -> Self {
        Self::builder().config(config).override_mode(mode).build()
    }

    /// Start configuring a manager
    pub fn builder() -> ServiceManagerBuilder {
        ServiceManagerBuilder::new()
    }

    /// Build a fresh instance of `name`, never reading or writing the cache.
    pub fn build(&self, name: &str, options: Option<&Options>) -> ServiceResult<Service> {
        let resolved = self.resolve_alias(name);
        self.create_service_object(&resolved, options)
    }

    /// Find a cached instance of `name` or create one.
    pub fn get(&self, name: &str) -> ServiceResult<Service> {
        if let Some(service) = self.services.read().get(name) {
            return Ok(service.clone());
        }

        let resolved = self.resolve_alias(name);

        if resolved != name && self.shared.read().flag(name) != Some(false) {
            let mut services = self.services.write();
            if let Some(service) = services.get(&resolved).cloned() {
                debug!("Sharing cached service '{}' under alias '{}'", resolved, name);
                services.insert(name.to_string(), service.clone());
                return Ok(service);
            }
        }

        let service = self.create_service_object(&resolved, None)?;

        self.save_shared_service(&resolved, &service);
        if resolved != name {
            self.save_shared_service(name, &service);
        }

        Ok(service)
    }

    /// Store `service` under `name`.
    ///
    /// Fails with [`ServiceError::ModificationNotAllowed`] when overrides are
    /// forbidden and an instance is already cached under `name`.
    pub fn set(&self, name: &str, service: Service) -> ServiceResult<()> {
        let mut services = self.services.write();
        self.ensure_modifiable(EntryKind::Service, name, services.contains_key(name))?;
        services.insert(name.to_string(), service);
        debug!("Set service instance: {}", name);
        Ok(())
    }

    /// Whether an instance is cached under exactly `name` (aliases are not
    /// consulted).
    pub fn has(&self, name: &str) -> bool {
        self.services.read().contains_key(name)
    }

    /// Point `alias` at `target`.
    ///
    /// Fails with [`ServiceError::ModificationNotAllowed`] when overrides are
    /// forbidden and `alias` is already defined.
    pub fn set_alias(&self, alias: &str, target: &str) -> ServiceResult<()> {
        let mut aliases = self.aliases.write();
        self.ensure_modifiable(EntryKind::Alias, alias, aliases.contains(alias))?;
        aliases.insert(alias, target);
        debug!("Set alias: {} -> {}", alias, target);
        Ok(())
    }

    /// Register the factory (or factory type identifier) for `service_name`.
    ///
    /// Fails with [`ServiceError::ModificationNotAllowed`] when overrides are
    /// forbidden and `service_name` already has a factory entry, including a
    /// default-factory entry written back by an earlier lookup.
    pub fn set_factory(&self, service_name: &str, factory: impl Into<FactoryEntry>) -> ServiceResult<()> {
        let mut factories = self.factories.write();
        self.ensure_modifiable(EntryKind::Factory, service_name, factories.contains(service_name))?;
        let entry = factory.into();
        debug!("Set factory for {}: {:?}", service_name, entry);
        factories.insert(service_name, entry);
        Ok(())
    }

    /// Set the shared flag of `service_name`.
    ///
    /// Fails with [`ServiceError::ModificationNotAllowed`] when overrides are
    /// forbidden and `service_name` already has a flag.
    pub fn set_shared(&self, service_name: &str, flag: bool) -> ServiceResult<()> {
        let mut shared = self.shared.write();
        self.ensure_modifiable(EntryKind::SharedFlag, service_name, shared.contains(service_name))?;
        shared.insert(service_name, flag);
        debug!("Set shared flag for {}: {}", service_name, flag);
        Ok(())
    }

    /// Whether existing entries may currently be replaced
    pub fn can_override(&self) -> bool {
        self.mode.read().allows_override()
    }

    /// Forbid overrides for the rest of this manager's life.
    pub fn forbid_override(&self) {
        let mut mode = self.mode.write();
        if mode.allows_override() {
            info!("Service manager overrides forbidden");
        }
        *mode = OverrideMode::CanNotOverride;
    }

    /// Current override mode
    pub fn override_mode(&self) -> OverrideMode {
        *self.mode.read()
    }

    /// The factory for `service_name`, normalizing its table entry.
    pub fn get_factory(&self, service_name: &str) -> Arc<dyn Factory> {
        self.factories.write().get_factory(service_name)
    }

    /// One-hop alias resolution
    pub fn resolve_alias(&self, name: &str) -> String {
        self.aliases.read().resolve(name).to_string()
    }

    /// Snapshot of the alias table
    pub fn aliases(&self) -> BTreeMap<String, String> {
        self.aliases.read().to_map()
    }

    /// Snapshot of the explicit shared flags
    pub fn shared_flags(&self) -> BTreeMap<String, bool> {
        self.shared.read().to_map()
    }

    /// Shared policy for names without an explicit flag
    pub fn shared_by_default(&self) -> bool {
        self.shared.read().shared_by_default()
    }

    /// Snapshot of the factory entry for `service_name`
    pub fn factory_entry(&self, service_name: &str) -> Option<FactoryEntry> {
        self.factories.read().entry(service_name).cloned()
    }

    /// Service names with a factory entry
    pub fn factory_names(&self) -> Vec<String> {
        self.factories.read().names()
    }

    /// Names with a cached instance
    pub fn service_names(&self) -> Vec<String> {
        self.services.read().keys().cloned().collect()
    }

    /// The locator handed to factories, or `None` when it is this manager.
    pub fn creation_context(&self) -> Option<&Arc<dyn ServiceLocator>> {
        self.creation_context.as_ref()
    }

    /// The type registry backing the default factory
    pub fn types(&self) -> Arc<TypeRegistry> {
        self.factories.read().types().clone()
    }

    fn create_service_object(&self, name: &str, options: Option<&Options>) -> ServiceResult<Service> {
        let factory = self.get_factory(name);
        let context: &dyn ServiceLocator = match &self.creation_context {
            Some(context) => context.as_ref(),
            None => self,
        };
        factory.create(context, name, options)
    }

    fn save_shared_service(&self, name: &str, service: &Service) {
        if self.shared.read().should_cache(name) {
            self.services
                .write()
                .insert(name.to_string(), service.clone());
            debug!("Cached shared service: {}", name);
        }
    }

    fn ensure_modifiable(&self, kind: EntryKind, name: &str, exists: bool) -> ServiceResult<()> {
        if exists && !self.can_override() {
            warn!("Rejected update of existing {} '{}'", kind, name);
            return Err(ServiceError::not_allowed(kind, name));
        }
        Ok(())
    }
}

impl ServiceLocator for ServiceManager {
    fn build(&self, name: &str, options: Option<&Options>) -> ServiceResult<Service> {
        ServiceManager::build(self, name, options)
    }

    fn get(&self, name: &str) -> ServiceResult<Service> {
        ServiceManager::get(self, name)
    }

    fn set(&self, name: &str, service: Service) -> ServiceResult<()> {
        ServiceManager::set(self, name, service)
    }

    fn has(&self, name: &str) -> bool {
        ServiceManager::has(self, name)
    }
}

impl Default for ServiceManager {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ServiceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceManager")
            .field("services", &self.service_names())
            .field("aliases", &self.aliases())
            .field("factories", &self.factory_names())
            .field("shared", &self.shared_flags())
            .field("shared_by_default", &self.shared_by_default())
            .field("override_mode", &self.override_mode())
            .field("has_creation_context", &self.creation_context.is_some())
            .finish()
    }
}

/// Builder pattern for configuring the service manager
pub struct ServiceManagerBuilder {
    config: ServiceManagerConfig,
    mode: OverrideMode,
    types: Option<Arc<TypeRegistry>>,
    creation_context: Option<Arc<dyn ServiceLocator>>,
}

impl ServiceManagerBuilder {
    /// Create a builder with an empty configuration and a closed gate
    pub fn new() -> Self {
        Self {
            config: ServiceManagerConfig::default(),
            mode: OverrideMode::default(),
            types: None,
            creation_context: None,
        }
    }

    /// Merge a configuration snapshot; may be called repeatedly.
    pub fn config(mut self, config: ServiceManagerConfig) -> Self {
        self.config.merge(config);
        self
    }

    /// Set the initial override mode
    pub fn override_mode(mut self, mode: OverrideMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use `types` instead of the inventory-discovered registry
    pub fn types(mut self, types: Arc<TypeRegistry>) -> Self {
        self.types = Some(types);
        self
    }

    /// Hand `context` to factories instead of the manager being built
    pub fn creation_context(mut self, context: Arc<dyn ServiceLocator>) -> Self {
        self.creation_context = Some(context);
        self
    }

    /// Build the manager
    pub fn build(self) -> ServiceManager {
        let types = self
            .types
            .unwrap_or_else(|| Arc::new(TypeRegistry::discovered()));

        let mut aliases = AliasTable::new();
        aliases.merge(self.config.aliases);

        let mut factories = FactoryRegistry::new(types);
        factories.merge(self.config.factories);

        let mut shared = SharedPolicy::default();
        shared.merge(self.config.shared);
        if let Some(shared_by_default) = self.config.shared_by_default {
            shared.set_shared_by_default(shared_by_default);
        }

        info!(
            "Created service manager ({} aliases, {} factories, {} shared flags, {})",
            aliases.len(),
            factories.len(),
            shared.len(),
            self.mode
        );

        ServiceManager {
            services: RwLock::new(BTreeMap::new()),
            aliases: RwLock::new(aliases),
            factories: RwLock::new(factories),
            shared: RwLock::new(shared),
            mode: RwLock::new(self.mode),
            creation_context: self.creation_context,
        }
    }
}

impl Default for ServiceManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::factory_fn;

    #[derive(Debug)]
    struct Widget;

    fn types() -> Arc<TypeRegistry> {
        let mut types = TypeRegistry::new();
        types.register_service("Widget", |_| Ok(Widget));
        Arc::new(types)
    }

    #[test]
    fn test_build_never_caches() {
        let manager = ServiceManager::builder().types(types()).build();
        let first = manager.build("Widget", None).unwrap();
        let second = manager.build("Widget", None).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert!(!manager.has("Widget"));
        assert!(manager.service_names().is_empty());
    }

    #[test]
    fn test_get_caches_shared_by_default() {
        let manager = ServiceManager::builder().types(types()).build();
        let first = manager.get("Widget").unwrap();
        let second = manager.get("Widget").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(manager.has("Widget"));
    }

    #[test]
    fn test_failed_get_leaves_cache_untouched() {
        let manager = ServiceManager::builder().types(types()).build();
        assert!(matches!(
            manager.get("Gadget"),
            Err(ServiceError::ConstructionFailure { .. })
        ));
        assert!(manager.service_names().is_empty());
    }

    #[test]
    fn test_factory_may_call_back_into_manager() {
        let config = ServiceManagerConfig::new().with_factory_instance(
            "pair",
            factory_fn(|context, _, _| {
                let widget = context.get("Widget")?;
                Ok(Arc::new((widget, 2u8)) as Service)
            }),
        );
        let manager = ServiceManager::builder().types(types()).config(config).build();

        manager.get("pair").unwrap();
        assert!(manager.has("pair"));
        assert!(manager.has("Widget"));
    }

    #[test]
    fn test_forbid_override_is_one_way() {
        let manager = ServiceManager::builder()
            .types(types())
            .override_mode(OverrideMode::CanOverride)
            .build();
        assert!(manager.can_override());

        manager.forbid_override();
        assert!(!manager.can_override());
        manager.forbid_override();
        assert_eq!(manager.override_mode(), OverrideMode::CanNotOverride);
    }
}
