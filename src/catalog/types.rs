use super::key::LinterKey;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How a linter gets into the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationType {
    DockerBinary,
    Npm,
    Pip,
    Go,
    Cargo,
    Gem,
    Script,
    Dockerfile,
    #[default]
    #[serde(rename = "none")]
    Unspecified,
}

impl InstallationType {
    pub const ALL: [InstallationType; 9] = [
        Self::DockerBinary,
        Self::Npm,
        Self::Pip,
        Self::Go,
        Self::Cargo,
        Self::Gem,
        Self::Script,
        Self::Dockerfile,
        Self::Unspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DockerBinary => "docker_binary",
            Self::Npm => "npm",
            Self::Pip => "pip",
            Self::Go => "go",
            Self::Cargo => "cargo",
            Self::Gem => "gem",
            Self::Script => "script",
            Self::Dockerfile => "dockerfile",
            Self::Unspecified => "none",
        }
    }

    pub fn is_package_manager(&self) -> bool {
        matches!(
            self,
            Self::Npm | Self::Pip | Self::Go | Self::Cargo | Self::Gem
        )
    }
}

impl fmt::Display for InstallationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default installation metadata for one linter.
///
/// The same shape is used for entries extracted from upstream descriptors and
/// for hand-maintained entries in `linter-sources.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinterCatalogEntry {
    #[serde(default)]
    pub linter_key: LinterKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor_id: Option<String>,
    #[serde(default, alias = "linter_name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_version_arg_name: Option<String>,
    #[serde(rename = "type", default)]
    pub installation_type: InstallationType,
    #[serde(
        default,
        alias = "default_version",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    #[serde(default, alias = "apk", skip_serializing_if = "Vec::is_empty")]
    pub system_dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Accept scalars YAML would otherwise type as numbers (`version: 1.10`).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

/// Where a corpus came from. Decides how unresolved custom linters are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusMode {
    /// Extracted from upstream descriptor documents.
    Extracted,
    /// Loaded from a hand-maintained `linter-sources.yaml`.
    Static,
}

/// The linter catalog and base flavor membership used by resolution.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub mode: CorpusMode,
    pub linters: BTreeMap<LinterKey, LinterCatalogEntry>,
    pub base_flavor_linters: BTreeMap<String, Vec<LinterKey>>,
}

impl Corpus {
    pub fn new(mode: CorpusMode) -> Self {
        Self {
            mode,
            linters: BTreeMap::new(),
            base_flavor_linters: BTreeMap::new(),
        }
    }

    pub fn entry(&self, key: &str) -> Option<&LinterCatalogEntry> {
        self.linters.get(key)
    }

    pub fn base_linters(&self, flavor: &str) -> Option<&[LinterKey]> {
        self.base_flavor_linters.get(flavor).map(Vec::as_slice)
    }

    pub fn flavors(&self) -> impl Iterator<Item = &str> {
        self.base_flavor_linters.keys().map(String::as_str)
    }

    /// Number of catalog entries per installation type, in declaration order.
    pub fn type_counts(&self) -> Vec<(InstallationType, usize)> {
        InstallationType::ALL
            .iter()
            .map(|t| {
                let count = self
                    .linters
                    .values()
                    .filter(|e| e.installation_type == *t)
                    .count();
                (*t, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
