//! Flavor documents and custom linter override shapes.
//!
//! Two generations of `flavor.yaml` exist. Custom linters may be bare keys or
//! records, and docker images may be written as one combined `image` or as
//! discrete `source_image`/`version`/`digest` fields. Everything is brought
//! into a single [`NormalizedOverride`] here, before any merging happens.

use crate::catalog::types::lenient_string;
use crate::catalog::{InstallationType, LinterKey};
use crate::descriptor::ImageReference;
use crate::error::{FactoryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const FLAVOR_FILE_NAME: &str = "flavor.yaml";
pub const DEFAULT_BASE_FLAVOR: &str = "ci_light";
pub const UPSTREAM_REPOSITORY_PREFIX: &str = "oxsecurity/megalinter-";

fn default_base_flavor() -> String {
    DEFAULT_BASE_FLAVOR.to_string()
}

/// A user-authored flavor definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_base_flavor")]
    pub base_flavor: String,
    /// Combined upstream reference, e.g. `oxsecurity/megalinter-ci_light:v9.1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_image: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub upstream_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_digest: Option<String>,
    #[serde(default)]
    pub custom_linters: Vec<CustomLinterEntry>,
}

impl Default for FlavorSpec {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            base_flavor: default_base_flavor(),
            upstream_image: None,
            upstream_version: None,
            upstream_digest: None,
            custom_linters: Vec::new(),
        }
    }
}

impl FlavorSpec {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unknown")
    }

    /// The upstream image the flavor builds on. The combined `upstream_image`
    /// wins over the legacy `upstream_version`/`upstream_digest` pair.
    pub fn upstream(&self) -> Option<ImageReference> {
        if let Some(image) = &self.upstream_image {
            return Some(ImageReference::parse(image));
        }
        self.upstream_version.as_ref().map(|version| ImageReference {
            repository: format!("{}{}", UPSTREAM_REPOSITORY_PREFIX, self.base_flavor),
            tag: version.clone(),
            digest: self.upstream_digest.clone(),
        })
    }

    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<Option<Self>>(content)
            .map(Option::unwrap_or_default)
            .map_err(|e| FactoryError::malformed(path, e))
    }
}

/// Load `flavor.yaml` from a flavor directory.
pub fn load_flavor(flavor_dir: &Path) -> Result<FlavorSpec> {
    if !flavor_dir.is_dir() {
        return Err(FactoryError::missing(flavor_dir));
    }
    let path = flavor_dir.join(FLAVOR_FILE_NAME);
    if !path.is_file() {
        return Err(FactoryError::missing(path));
    }
    let content = fs::read_to_string(&path)?;
    FlavorSpec::from_yaml_str(&content, &path)
}

/// One item of `custom_linters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomLinterEntry {
    /// Accept the catalog defaults unchanged.
    Key(LinterKey),
    /// Override any subset of the catalog fields.
    Override(Box<LinterOverride>),
}

/// Structured custom linter record, current and legacy fields alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinterOverride {
    pub linter_key: LinterKey,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub installation_type: Option<InstallationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Combined `repository:tag@digest`, preferred over the discrete fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(
        default,
        alias = "dockerfile",
        alias = "script",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<Vec<String>>,
}

/// Canonical override shape consumed by the merge step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedOverride {
    pub linter_key: LinterKey,
    /// Written as a bare key: there is nothing to fall back on without a catalog entry.
    pub bare: bool,
    pub installation_type: Option<InstallationType>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub version_command: Option<String>,
    pub description: Option<String>,
    pub source_image: Option<String>,
    pub digest: Option<String>,
    pub binary_path: Option<String>,
    pub target_path: Option<String>,
    pub package: Option<String>,
    pub instructions: Option<Vec<String>>,
    /// Parsed combined `image`, which replaces image, version and digest wholesale.
    pub image: Option<ImageReference>,
}

impl CustomLinterEntry {
    pub fn linter_key(&self) -> &LinterKey {
        match self {
            Self::Key(key) => key,
            Self::Override(record) => &record.linter_key,
        }
    }

    pub fn normalize(&self) -> NormalizedOverride {
        match self {
            Self::Key(key) => NormalizedOverride {
                linter_key: key.clone(),
                bare: true,
                ..Default::default()
            },
            Self::Override(record) => {
                let record = record.as_ref();
                NormalizedOverride {
                    linter_key: record.linter_key.clone(),
                    bare: false,
                    installation_type: record.installation_type,
                    name: non_empty(&record.name),
                    version: non_empty(&record.version),
                    version_command: non_empty(&record.version_command),
                    description: record.description.clone(),
                    source_image: non_empty(&record.source_image),
                    digest: non_empty(&record.digest),
                    binary_path: non_empty(&record.binary_path),
                    target_path: non_empty(&record.target_path),
                    package: non_empty(&record.package),
                    instructions: record
                        .instructions
                        .clone()
                        .filter(|lines| !lines.is_empty()),
                    image: non_empty(&record.image).map(|image| ImageReference::parse(&image)),
                }
            }
        }
    }
}

// legacy files write `digest: ""` for "no digest"
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
