//! Type registry: named constructors for services and factories
//!
//! Service names that have no dedicated factory are built by the
//! [`DefaultFactory`](crate::DefaultFactory), which looks the name up here.
//! Factory type identifiers in configuration are resolved here as well.
//!
//! Constructors are registered explicitly, or distributed across crates with
//! `inventory::submit!` and collected by [`TypeRegistry::discovered`]:
//!
//! ```rust,ignore
//! use service_manager::{Options, Service, ServiceResult, TypeRegistration};
//! use std::sync::Arc;
//!
//! fn create_mailer(options: Option<&Options>) -> ServiceResult<Service> {
//!     Ok(Arc::new(Mailer::new(options)))
//! }
//!
//! inventory::submit! {
//!     TypeRegistration::service("Mailer", create_mailer)
//! }
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::factory::Factory;
use crate::locator::{Options, Service};

/// Builds a service from optional construction options
pub type ServiceConstructor = Arc<dyn Fn(Option<&Options>) -> ServiceResult<Service> + Send + Sync>;

/// Builds a factory with no arguments
pub type FactoryConstructor = Arc<dyn Fn() -> Arc<dyn Factory> + Send + Sync>;

/// Constructor carried by a [`TypeRegistration`]
#[derive(Clone, Copy)]
pub enum TypeConstructor {
    Service(fn(Option<&Options>) -> ServiceResult<Service>),
    Factory(fn() -> Arc<dyn Factory>),
}

/// A constructor registration that can be collected via inventory.
pub struct TypeRegistration {
    /// Type identifier the constructor is registered under
    pub name: &'static str,

    pub constructor: TypeConstructor,
}

impl TypeRegistration {
    /// Register a service constructor
    pub const fn service(
        name: &'static str,
        constructor: fn(Option<&Options>) -> ServiceResult<Service>,
    ) -> Self {
        Self {
            name,
            constructor: TypeConstructor::Service(constructor),
        }
    }

    /// Register a zero-argument factory constructor
    pub const fn factory(name: &'static str, constructor: fn() -> Arc<dyn Factory>) -> Self {
        Self {
            name,
            constructor: TypeConstructor::Factory(constructor),
        }
    }
}

inventory::collect!(TypeRegistration);

/// Named constructors for services and factories
#[derive(Clone, Default)]
pub struct TypeRegistry {
    services: HashMap<String, ServiceConstructor>,
    factories: HashMap<String, FactoryConstructor>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every `TypeRegistration` submitted via
    /// `inventory::submit!` in the linked crates.
    pub fn discovered() -> Self {
        let mut registry = Self::new();
        let mut count = 0usize;

        for registration in inventory::iter::<TypeRegistration> {
            registry.register_discovered(registration);
            count += 1;
        }

        info!("Discovered {} type registrations via inventory", count);
        registry
    }

    fn register_discovered(&mut self, registration: &TypeRegistration) {
        match registration.constructor {
            TypeConstructor::Service(constructor) => {
                self.services
                    .insert(registration.name.to_string(), Arc::new(constructor));
            }
            TypeConstructor::Factory(constructor) => {
                self.factories
                    .insert(registration.name.to_string(), Arc::new(constructor));
            }
        }
        debug!("Registered discovered type: {}", registration.name);
    }

    /// Register a service constructor under `name`
    pub fn register_service<T, F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        T: Any + Send + Sync,
        F: Fn(Option<&Options>) -> ServiceResult<T> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registered service type: {}", name);

        let wrapped: ServiceConstructor = Arc::new(move |options: Option<&Options>| -> ServiceResult<Service> {
            let instance = constructor(options)?;
            Ok(Arc::new(instance) as Service)
        });
        self.services.insert(name, wrapped);
        self
    }

    /// Register a zero-argument factory constructor under `name`
    pub fn register_factory<T, F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        T: Factory + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registered factory type: {}", name);

        let wrapped: FactoryConstructor = Arc::new(move || Arc::new(constructor()) as Arc<dyn Factory>);
        self.factories.insert(name, wrapped);
        self
    }

    /// Construct the service type registered under `name`
    pub fn construct(&self, name: &str, options: Option<&Options>) -> ServiceResult<Service> {
        let constructor = self.services.get(name).ok_or_else(|| {
            ServiceError::construction(name, "no constructible type is registered under this name")
        })?;
        constructor(options)
    }

    /// Instantiate the factory type registered under `name`
    pub fn instantiate_factory(&self, name: &str) -> Option<Arc<dyn Factory>> {
        self.factories.get(name).map(|constructor| constructor())
    }

    pub fn has_service_type(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    pub fn has_factory_type(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Names of all registered service types, sorted
    pub fn service_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of all registered factory types, sorted
    pub fn factory_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("services", &self.service_type_names())
            .field("factories", &self.factory_type_names())
            .finish()
    }
}
