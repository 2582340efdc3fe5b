//! Name-keyed service locator
//!
//! This crate provides a service locator for plugin-style applications: a
//! registry mapping service names to instances, created lazily by pluggable
//! factories, optionally shared, and reachable through aliases. Existing
//! entries are protected by an override gate.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_manager::{OverrideMode, ServiceManager, ServiceManagerConfig, TypeRegistry};
//! use std::sync::Arc;
//!
//! struct Mailer;
//!
//! let mut types = TypeRegistry::new();
//! types.register_service("Mailer", |_| Ok(Mailer));
//!
//! let manager = ServiceManager::builder()
//!     .types(Arc::new(types))
//!     .config(ServiceManagerConfig::new().with_alias("mail", "Mailer"))
//!     .override_mode(OverrideMode::CanNotOverride)
//!     .build();
//!
//! let mailer = manager.get("mail").unwrap();
//! assert!(mailer.is::<Mailer>());
//! assert!(manager.has("Mailer"));
//! ```
//!
//! See [`usage`] module for detailed usage examples.

pub mod alias;
pub mod config;
pub mod error;
pub mod factory;
pub mod gate;
pub mod locator;
pub mod manager;
pub mod registry;
pub mod shared;
pub mod types;
pub mod usage;

pub use alias::AliasTable;
pub use config::ServiceManagerConfig;
pub use error::{EntryKind, ServiceError, ServiceResult};
pub use factory::{factory_fn, DefaultFactory, Factory, FactoryEntry, FnFactory};
pub use gate::OverrideMode;
pub use locator::{downcast_service, service_is, Options, Service, ServiceLocator, ServiceLocatorExt};
pub use manager::{ServiceManager, ServiceManagerBuilder};
pub use registry::FactoryRegistry;
pub use shared::SharedPolicy;
pub use types::{TypeConstructor, TypeRegistration, TypeRegistry};

/// Convenience macro for resolving a typed service by name
#[macro_export]
macro_rules! resolve_service {
    ($locator:expr, $service_type:ty, $name:expr) => {
        $crate::ServiceLocatorExt::get_as::<$service_type>(&$locator, $name)
    };
}
