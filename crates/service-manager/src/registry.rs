//! Named factory registry
//!
//! Maps service names to [`FactoryEntry`] values and hands out live factories,
//! instantiating type identifiers on first use and falling back to the
//! [`DefaultFactory`] for names without a usable entry. Both outcomes are
//! written back, so later lookups for the same name are plain map reads.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::factory::{DefaultFactory, Factory, FactoryEntry};
use crate::types::TypeRegistry;

/// Factory table keyed by service name
pub struct FactoryRegistry {
    entries: BTreeMap<String, FactoryEntry>,
    types: Arc<TypeRegistry>,
    default_factory: Arc<dyn Factory>,
}

impl FactoryRegistry {
    /// Create an empty table whose default factory builds from `types`
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        let default_factory: Arc<dyn Factory> = Arc::new(DefaultFactory::new(types.clone()));
        Self {
            entries: BTreeMap::new(),
            types,
            default_factory,
        }
    }

    /// Return the factory for `service_name`, normalizing its entry.
    pub fn get_factory(&mut self, service_name: &str) -> Arc<dyn Factory> {
        let unresolved = match self.entries.get(service_name) {
            Some(FactoryEntry::Unresolved(type_id)) => Some(type_id.clone()),
            _ => None,
        };

        if let Some(type_id) = unresolved {
            match self.types.instantiate_factory(&type_id) {
                Some(factory) => {
                    debug!("Instantiated factory '{}' for service '{}'", type_id, service_name);
                    self.entries.insert(
                        service_name.to_string(),
                        FactoryEntry::Resolved(factory),
                    );
                }
                None => {
                    warn!(
                        "Factory type '{}' for service '{}' is not registered, using default factory",
                        type_id, service_name
                    );
                }
            }
        }

        if let Some(FactoryEntry::Resolved(factory)) = self.entries.get(service_name) {
            return factory.clone();
        }

        debug!("Using default factory for service '{}'", service_name);
        self.entries.insert(
            service_name.to_string(),
            FactoryEntry::Resolved(self.default_factory.clone()),
        );
        self.default_factory.clone()
    }

    pub fn entry(&self, service_name: &str) -> Option<&FactoryEntry> {
        self.entries.get(service_name)
    }

    pub fn contains(&self, service_name: &str) -> bool {
        self.entries.contains_key(service_name)
    }

    /// Insert or overwrite an entry
    pub fn insert(&mut self, service_name: impl Into<String>, entry: FactoryEntry) {
        self.entries.insert(service_name.into(), entry);
    }

    /// Union with `entries`, overwriting existing keys
    pub fn merge<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, FactoryEntry)>,
    {
        self.entries.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Service names with a factory entry, in order
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// The type registry backing this factory table
    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }
}
