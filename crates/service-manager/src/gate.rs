//! Override-permission gate

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Whether existing aliases, factories, shared flags and instances may be
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideMode {
    CanOverride,
    #[default]
    CanNotOverride,
}

impl OverrideMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideMode::CanOverride => "can_override",
            OverrideMode::CanNotOverride => "can_not_override",
        }
    }

    pub fn allows_override(&self) -> bool {
        matches!(self, OverrideMode::CanOverride)
    }
}

impl FromStr for OverrideMode {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "can_override" => Ok(OverrideMode::CanOverride),
            "can_not_override" => Ok(OverrideMode::CanNotOverride),
            other => Err(ServiceError::InvalidOverrideMode(other.to_string())),
        }
    }
}

impl fmt::Display for OverrideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
