//! Typed view of the upstream `*.megalinter-descriptor.yml` documents.
//!
//! Only the fields extraction reads are modelled; everything else in a
//! descriptor is ignored.

use crate::error::{FactoryError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One descriptor document: a tool family and its linters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorDocument {
    #[serde(default)]
    pub descriptor_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub install: InstallSpec,
    #[serde(default, deserialize_with = "null_as_default")]
    pub linters: Vec<LinterDescriptor>,
}

/// A linter declared inside a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinterDescriptor {
    #[serde(default)]
    pub linter_name: String,
    #[serde(default)]
    pub cli_version_arg_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub install: InstallSpec,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled_in_flavor: Vec<String>,
}

/// Install recipe of a descriptor or linter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub dockerfile: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub npm: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pip: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apk: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub only_in_flavor: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DescriptorDocument {
    /// Parse a descriptor. `path` only feeds error messages.
    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<Option<Self>>(content)
            .map(Option::unwrap_or_default)
            .map_err(|e| FactoryError::malformed(path, e))
    }
}
