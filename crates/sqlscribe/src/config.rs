//! Builder configuration loaded from TOML.
//!
//! ```toml
//! vendor = "postgresql"               # postgresql | sqlite | mysql | sqlserver | unspecified
//! naming_convention = "lower_snake_case"
//! pluralize_table_names = true
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use crate::error::{ScribeError, ScribeResult};
use crate::naming::NamingConvention;
use crate::vendor::DatabaseVendor;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Vendor, naming convention and pluralization shared by every builder of a factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    #[serde(deserialize_with = "vendor_from_str")]
    pub vendor: DatabaseVendor,
    #[serde(deserialize_with = "convention_from_str")]
    pub naming_convention: NamingConvention,
    pub pluralize_table_names: bool,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            vendor: DatabaseVendor::PostgreSql,
            naming_convention: NamingConvention::LowerSnakeCase,
            pluralize_table_names: true,
        }
    }
}

impl ScribeConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(raw: &str) -> ScribeResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> ScribeResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScribeError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ScribeError::config(format!("failed to parse config file {}: {e}", path.display()))
        })
    }

    pub fn to_toml_string(&self) -> ScribeResult<String> {
        toml::to_string(self).map_err(|e| ScribeError::config(e.to_string()))
    }
}

fn vendor_from_str<'de, D: Deserializer<'de>>(d: D) -> Result<DatabaseVendor, D::Error> {
    let raw = String::deserialize(d)?;
    // Unknown vendors map to Unspecified.
    Ok(raw.parse().unwrap_or_default())
}

fn convention_from_str<'de, D: Deserializer<'de>>(d: D) -> Result<NamingConvention, D::Error> {
    let raw = String::deserialize(d)?;
    raw.parse().map_err(serde::de::Error::custom)
}
