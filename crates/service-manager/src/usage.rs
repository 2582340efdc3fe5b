//! # Service Manager Usage Guide
//!
//! The service manager wires services by name. Factories decide how a
//! service is built, aliases give it more names, and shared flags decide
//! whether the built instance is reused.
//!
//! ## Registering Types
//!
//! Names without a dedicated factory are built by the default factory, which
//! looks them up in a [`TypeRegistry`](crate::TypeRegistry):
//!
//! ```rust
//! use service_manager::{Options, TypeRegistry};
//!
//! struct Mailer {
//!     options: Option<Options>,
//! }
//!
//! let mut types = TypeRegistry::new();
//! types.register_service("Mailer", |options| {
//!     Ok(Mailer { options: options.cloned() })
//! });
//! ```
//!
//! Crates can also contribute constructors at link time:
//!
//! ```rust,ignore
//! inventory::submit! {
//!     service_manager::TypeRegistration::factory("SmtpMailerFactory", create_smtp_factory)
//! }
//!
//! let types = TypeRegistry::discovered();
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use service_manager::ServiceManagerConfig;
//!
//! let config = ServiceManagerConfig::from_toml_str(r#"
//!     shared_by_default = true
//!
//!     [aliases]
//!     mail = "Mailer"
//!
//!     [factories]
//!     Mailer = "SmtpMailerFactory"
//!
//!     [shared]
//!     Request = false
//! "#).unwrap();
//!
//! assert_eq!(config.aliases.len(), 1);
//! ```
//!
//! Files are loaded with [`ServiceManagerConfig::load`](crate::ServiceManagerConfig::load).
//! `.toml` and `.json` files are read with their keys untouched, then
//! `SERVICE_MANAGER_*` environment variables are layered on top, with `__`
//! between nested keys:
//!
//! ```text
//! SERVICE_MANAGER_SHARED_BY_DEFAULT=false
//! SERVICE_MANAGER_ALIASES__MAIL=Sendmail
//! ```
//!
//! ## Resolving Services
//!
//! ```rust,ignore
//! let manager = ServiceManager::builder()
//!     .types(Arc::new(types))
//!     .config(config)
//!     .build();
//!
//! // Cached (shared) instance
//! let mailer = manager.get("mail")?;
//!
//! // Always a fresh instance, with construction options
//! let mut options = Options::new();
//! options.insert("host".into(), "localhost".into());
//! let fresh = manager.build("Mailer", Some(&options))?;
//!
//! // Typed access
//! let mailer: Arc<Mailer> = manager.get_as("mail")?;
//! let mailer = resolve_service!(manager, Mailer, "mail")?;
//! ```
//!
//! ## Shared Instances
//!
//! - `shared_by_default` (default `true`) applies to names without a flag.
//! - A flag of `false` on a service stops it from being cached under its own
//!   name. An alias pointing at it has its own flag, so `get("alias")` may
//!   still cache the instance under the alias.
//!
//! ## Override Gate
//!
//! A manager built with [`OverrideMode::CanNotOverride`](crate::OverrideMode)
//! (the default) rejects `set`, `set_alias`, `set_factory` and `set_shared`
//! for keys that already exist with
//! [`ServiceError::ModificationNotAllowed`](crate::ServiceError). New keys are
//! always accepted. `forbid_override` closes an open gate for good.
//!
//! ## Creation Context
//!
//! Factories receive a [`ServiceLocator`](crate::ServiceLocator) to pull in
//! the services they depend on. By default it is the manager itself; child
//! managers can hand their factories a shared root instead:
//!
//! ```rust,ignore
//! let root = Arc::new(ServiceManager::builder().config(root_config).build());
//! let child = ServiceManager::builder()
//!     .config(plugin_config)
//!     .creation_context(root.clone())
//!     .build();
//! ```
