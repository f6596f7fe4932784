use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the 13th-salary and vacation provisions are amortized each month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvisionPolicy {
    /// `13th = salary / 12` and `vacation = salary × 4/3 / 12` (one month of
    /// vacation pay plus the one-third bonus).
    #[default]
    ConstitutionalThird,

    /// Both provisions are `(salary + charges) / 12`.
    ChargedBase,
}

impl ProvisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConstitutionalThird => "constitutional-third",
            Self::ChargedBase => "charged-base",
        }
    }
}

impl fmt::Display for ProvisionPolicy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`ProvisionPolicy`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown provision policy '{0}' (expected 'constitutional-third' or 'charged-base')")]
pub struct ParseProvisionPolicyError(pub String);

impl FromStr for ProvisionPolicy {
    type Err = ParseProvisionPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constitutional-third" => Ok(Self::ConstitutionalThird),
            "charged-base" => Ok(Self::ChargedBase),
            _ => Err(ParseProvisionPolicyError(s.to_string())),
        }
    }
}
