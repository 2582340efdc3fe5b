//! Service manager error types

use std::fmt;

use thiserror::Error;

/// Result type for service manager operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// The table a rejected mutation targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Instance cache entry
    Service,
    /// Alias table entry
    Alias,
    /// Factory table entry
    Factory,
    /// Shared flag entry
    SharedFlag,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Service => "service",
            EntryKind::Alias => "alias",
            EntryKind::Factory => "factory",
            EntryKind::SharedFlag => "shared flag",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while configuring or resolving services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(
        "Updating {kind} '{name}' is not allowed: it already exists and the service manager does not allow overrides"
    )]
    ModificationNotAllowed { kind: EntryKind, name: String },

    #[error("Failed to construct service '{name}': {message}")]
    ConstructionFailure { name: String, message: String },

    #[error("Service '{name}' is not of type {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Invalid override mode: {0}")]
    InvalidOverrideMode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ServiceError {
    /// Shorthand for a [`ServiceError::ConstructionFailure`]
    pub fn construction(name: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::ConstructionFailure {
            name: name.into(),
            message: message.into(),
        }
    }

    pub(crate) fn not_allowed(kind: EntryKind, name: &str) -> Self {
        ServiceError::ModificationNotAllowed {
            kind,
            name: name.to_string(),
        }
    }
}
