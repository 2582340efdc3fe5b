//! Service manager configuration
//!
//! A configuration snapshot carries four optional groups: `aliases`,
//! `factories`, `shared` and `shared_by_default`. Snapshots merge: maps are
//! unioned with later keys winning, and `shared_by_default` is only replaced
//! when the incoming snapshot sets it.
//!
//! ```toml
//! shared_by_default = true
//!
//! [aliases]
//! mail = "mailer"
//!
//! [factories]
//! mailer = "SmtpMailerFactory"
//!
//! [shared]
//! request = false
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ::config::{Config, Environment};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::factory::{Factory, FactoryEntry};

/// Environment variable prefix honored by [`ServiceManagerConfig::load`]
pub const ENV_PREFIX: &str = "SERVICE_MANAGER";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceManagerConfig {
    /// Alias name to canonical service name
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Service name to factory type identifier or live factory
    #[serde(default)]
    pub factories: BTreeMap<String, FactoryEntry>,
    /// Service name to shared flag
    #[serde(default)]
    pub shared: BTreeMap<String, bool>,
    /// Global shared policy; unset means "keep the current value"
    #[serde(default)]
    pub shared_by_default: Option<bool>,
}

impl ServiceManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    pub fn with_factory(mut self, service_name: impl Into<String>, entry: impl Into<FactoryEntry>) -> Self {
        self.factories.insert(service_name.into(), entry.into());
        self
    }

    /// Add a live factory instance
    pub fn with_factory_instance<F: Factory + 'static>(
        mut self,
        service_name: impl Into<String>,
        factory: F,
    ) -> Self {
        self.factories
            .insert(service_name.into(), FactoryEntry::resolved(factory));
        self
    }

    pub fn with_shared(mut self, service_name: impl Into<String>, flag: bool) -> Self {
        self.shared.insert(service_name.into(), flag);
        self
    }

    pub fn with_shared_by_default(mut self, shared_by_default: bool) -> Self {
        self.shared_by_default = Some(shared_by_default);
        self
    }

    /// Whether the snapshot sets nothing at all
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
            && self.factories.is_empty()
            && self.shared.is_empty()
            && self.shared_by_default.is_none()
    }

    /// Merge `other` into this snapshot
    pub fn merge(&mut self, other: ServiceManagerConfig) {
        self.aliases.extend(other.aliases);
        self.factories.extend(other.factories);
        self.shared.extend(other.shared);
        if other.shared_by_default.is_some() {
            self.shared_by_default = other.shared_by_default;
        }
    }

    /// Parse a TOML document
    pub fn from_toml_str(source: &str) -> ServiceResult<Self> {
        toml::from_str(source).map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Deserialize from a JSON value
    pub fn from_json_value(value: serde_json::Value) -> ServiceResult<Self> {
        serde_json::from_value(value).map_err(|e| ServiceError::Parse(e.to_string()))
    }

    /// Load from a TOML or JSON file (picked by extension), then apply
    /// environment overrides on top.
    ///
    /// Keys read from the file keep their case. Overrides are read from
    /// variables named `SERVICE_MANAGER_<KEY>`, with `__` separating nested
    /// keys, e.g. `SERVICE_MANAGER_SHARED_BY_DEFAULT=false` or
    /// `SERVICE_MANAGER_SHARED__REQUEST=false`. Environment variable names
    /// are lowercased, so service names set that way are lowercase.
    pub fn load(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        debug!("Loading service manager configuration from {}", path.display());

        let source = fs::read_to_string(path)?;
        let mut config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source)?,
            Some("json") => {
                serde_json::from_str(&source).map_err(|e| ServiceError::Parse(e.to_string()))?
            }
            _ => {
                return Err(ServiceError::Parse(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )))
            }
        };

        config.merge(Self::from_env()?);
        Ok(config)
    }

    /// Read the `SERVICE_MANAGER_*` environment overrides alone
    pub fn from_env() -> ServiceResult<Self> {
        let overrides = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let overrides: Self = overrides.try_deserialize()?;
        if !overrides.is_empty() {
            debug!("Applied environment overrides with prefix {}", ENV_PREFIX);
        }
        Ok(overrides)
    }
}
