//! TOML configuration file.
//!
//! ```toml
//! company = "Ostentação Prime"
//! salary = "5000"
//! incidence_on_provisions = true
//! policy = "charged-base"
//! rate_scale = "percent"
//!
//! [[charges]]
//! name = "INSS"
//! rate = "20"
//!
//! [[benefits]]
//! name = "Vale-refeição"
//! value = 600
//! ```
//!
//! Every key is optional. Numbers may be written as TOML numbers or as text;
//! both go through the same normalization as command-line input.

use std::path::Path;

use cost_core::{ProvisionPolicy, input::RateScale};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A number that may be written either as a TOML number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Text handed to the normalization functions.
    pub fn as_text(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChargeConfig {
    pub name: String,
    pub rate: RawNumber,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenefitConfig {
    pub name: String,
    pub value: RawNumber,
}

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub company: Option<String>,
    pub salary: Option<RawNumber>,
    pub incidence_on_provisions: Option<bool>,
    pub policy: Option<ProvisionPolicy>,
    pub rate_scale: Option<RateScale>,
    /// Replaces the statutory charges when present.
    pub charges: Option<Vec<ChargeConfig>>,
    pub benefits: Vec<BenefitConfig>,
}

impl AppConfig {
    pub fn from_toml_str(
        contents: &str,
        path: &str,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &display)
    }
}
