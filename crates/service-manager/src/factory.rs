//! Factories and factory table entries
//!
//! A [`Factory`] turns a requested name plus optional [`Options`] into a
//! [`Service`]. Factory table entries are stored either as a type identifier
//! still waiting to be instantiated, or as a live factory.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::error::ServiceResult;
use crate::locator::{Options, Service, ServiceLocator};
use crate::types::TypeRegistry;

/// Something that can create service instances.
pub trait Factory: Send + Sync {
    /// Create the service registered under `requested_name`.
    ///
    /// `context` is the creation-context locator, which factories may use to
    /// pull in other services while constructing this one.
    fn create(
        &self,
        context: &dyn ServiceLocator,
        requested_name: &str,
        options: Option<&Options>,
    ) -> ServiceResult<Service>;

    /// Name used in diagnostics
    fn factory_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A [`Factory`] backed by a closure, see [`factory_fn`].
pub struct FnFactory<F> {
    f: F,
}

impl<F> Factory for FnFactory<F>
where
    F: Fn(&dyn ServiceLocator, &str, Option<&Options>) -> ServiceResult<Service> + Send + Sync,
{
    fn create(
        &self,
        context: &dyn ServiceLocator,
        requested_name: &str,
        options: Option<&Options>,
    ) -> ServiceResult<Service> {
        (self.f)(context, requested_name, options)
    }

    fn factory_name(&self) -> &'static str {
        "FnFactory"
    }
}

/// Wrap a closure as a [`Factory`].
pub fn factory_fn<F>(f: F) -> FnFactory<F>
where
    F: Fn(&dyn ServiceLocator, &str, Option<&Options>) -> ServiceResult<Service> + Send + Sync,
{
    FnFactory { f }
}

/// The fallback factory: constructs the type registered under the requested
/// name, forwarding the options untouched.
pub struct DefaultFactory {
    types: Arc<TypeRegistry>,
}

impl DefaultFactory {
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self { types }
    }
}

impl Factory for DefaultFactory {
    fn create(
        &self,
        _context: &dyn ServiceLocator,
        requested_name: &str,
        options: Option<&Options>,
    ) -> ServiceResult<Service> {
        self.types.construct(requested_name, options)
    }

    fn factory_name(&self) -> &'static str {
        "DefaultFactory"
    }
}

/// A factory table entry
#[derive(Clone)]
pub enum FactoryEntry {
    /// Type identifier, instantiated through the type registry on first use
    Unresolved(String),
    /// Live factory instance
    Resolved(Arc<dyn Factory>),
}

impl FactoryEntry {
    /// Wrap a live factory.
    pub fn resolved<F: Factory + 'static>(factory: F) -> Self {
        FactoryEntry::Resolved(Arc::new(factory))
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, FactoryEntry::Resolved(_))
    }

    /// Type identifier of an unresolved entry, or the factory name of a
    /// resolved one.
    pub fn describe(&self) -> &str {
        match self {
            FactoryEntry::Unresolved(type_id) => type_id,
            FactoryEntry::Resolved(factory) => factory.factory_name(),
        }
    }
}

impl fmt::Debug for FactoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryEntry::Unresolved(type_id) => f.debug_tuple("Unresolved").field(type_id).finish(),
            FactoryEntry::Resolved(factory) => f
                .debug_tuple("Resolved")
                .field(&factory.factory_name())
                .finish(),
        }
    }
}

impl From<&str> for FactoryEntry {
    fn from(type_id: &str) -> Self {
        FactoryEntry::Unresolved(type_id.to_string())
    }
}

impl From<String> for FactoryEntry {
    fn from(type_id: String) -> Self {
        FactoryEntry::Unresolved(type_id)
    }
}

impl From<Arc<dyn Factory>> for FactoryEntry {
    fn from(factory: Arc<dyn Factory>) -> Self {
        FactoryEntry::Resolved(factory)
    }
}

// Configuration files can only name factory types.
impl<'de> Deserialize<'de> for FactoryEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(FactoryEntry::Unresolved)
    }
}
