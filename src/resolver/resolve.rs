//! Merging custom linter overrides with the catalog into a linter manifest.

use super::flavor::{FlavorSpec, NormalizedOverride};
use crate::catalog::{Corpus, CorpusMode, InstallationType, LinterCatalogEntry, LinterKey};
use crate::error::ResolveError;
use log::{debug, warn};
use serde::Serialize;

/// A linter inherited from the base flavor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseLinter {
    pub linter_key: LinterKey,
    pub name: String,
    pub version_command: String,
}

/// Type-specific installation data of a resolved custom linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Installation {
    DockerBinary {
        source_image: String,
        digest: Option<String>,
        binary_path: String,
        target_path: Option<String>,
    },
    Npm {
        package: String,
    },
    Pip {
        package: String,
    },
    Go {
        package: String,
    },
    Cargo {
        package: String,
    },
    Gem {
        package: String,
    },
    Script {
        instructions: Vec<String>,
    },
    Dockerfile {
        instructions: Vec<String>,
    },
    #[serde(rename = "none")]
    Unspecified,
}

impl Installation {
    pub fn installation_type(&self) -> InstallationType {
        match self {
            Self::DockerBinary { .. } => InstallationType::DockerBinary,
            Self::Npm { .. } => InstallationType::Npm,
            Self::Pip { .. } => InstallationType::Pip,
            Self::Go { .. } => InstallationType::Go,
            Self::Cargo { .. } => InstallationType::Cargo,
            Self::Gem { .. } => InstallationType::Gem,
            Self::Script { .. } => InstallationType::Script,
            Self::Dockerfile { .. } => InstallationType::Dockerfile,
            Self::Unspecified => InstallationType::Unspecified,
        }
    }

    pub fn package(&self) -> Option<&str> {
        match self {
            Self::Npm { package }
            | Self::Pip { package }
            | Self::Go { package }
            | Self::Cargo { package }
            | Self::Gem { package } => Some(package),
            _ => None,
        }
    }
}

/// A custom linter after merging its override with the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLinter {
    pub linter_key: LinterKey,
    pub name: String,
    pub version: Option<String>,
    pub version_command: Option<String>,
    pub description: String,
    #[serde(flatten)]
    pub installation: Installation,
    pub system_dependencies: Vec<String>,
}

impl ResolvedLinter {
    pub fn installation_type(&self) -> InstallationType {
        self.installation.installation_type()
    }

    /// Required fields of the installation type that ended up empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match &self.installation {
            Installation::DockerBinary {
                source_image,
                binary_path,
                ..
            } => {
                if source_image.is_empty() {
                    missing.push("source_image");
                }
                if binary_path.is_empty() {
                    missing.push("binary_path");
                }
            }
            Installation::Npm { package }
            | Installation::Pip { package }
            | Installation::Go { package }
            | Installation::Cargo { package }
            | Installation::Gem { package } => {
                if package.is_empty() {
                    missing.push("package");
                }
            }
            Installation::Script { instructions } | Installation::Dockerfile { instructions } => {
                if instructions.is_empty() {
                    missing.push("instructions");
                }
            }
            Installation::Unspecified => missing.push("type"),
        }
        missing
    }
}

/// Everything the rendering layer needs about a flavor's linters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinterManifest {
    pub all_linters: Vec<LinterKey>,
    pub base_linters: Vec<BaseLinter>,
    pub custom_linters: Vec<ResolvedLinter>,
}

impl LinterManifest {
    pub fn custom_linters_of(&self, installation_type: InstallationType) -> Vec<&ResolvedLinter> {
        self.custom_linters
            .iter()
            .filter(|l| l.installation_type() == installation_type)
            .collect()
    }

    /// Custom linters with empty required fields, with the fields in question.
    pub fn incomplete_linters(&self) -> Vec<(&ResolvedLinter, Vec<&'static str>)> {
        self.custom_linters
            .iter()
            .map(|l| (l, l.missing_fields()))
            .filter(|(_, missing)| !missing.is_empty())
            .collect()
    }

    /// Fail on the first custom linter with empty required fields.
    pub fn validate(&self) -> Result<(), ResolveError> {
        match self.incomplete_linters().into_iter().next() {
            Some((linter, fields)) => Err(ResolveError::MissingFields {
                key: linter.linter_key.to_string(),
                linter_type: linter.installation_type().to_string(),
                fields,
            }),
            None => Ok(()),
        }
    }
}

/// First word of the version command, else the key's last segment.
pub fn linter_display_name(linter_key: &LinterKey, version_command: Option<&str>) -> String {
    version_command
        .and_then(|command| command.split_whitespace().next())
        .map(str::to_string)
        .unwrap_or_else(|| linter_key.fallback_name())
}

/// Resolve a flavor against a corpus.
///
/// A bare custom linter key without a catalog entry is an error. A structured
/// override without one is merged against empty defaults for an extracted
/// corpus, and skipped with a warning for a static corpus.
pub fn resolve(flavor: &FlavorSpec, corpus: &Corpus) -> Result<LinterManifest, ResolveError> {
    let base_keys: Vec<LinterKey> = match corpus.base_linters(&flavor.base_flavor) {
        Some(keys) => keys.to_vec(),
        None => {
            warn!(
                "Base flavor '{}' is not known to the catalog; no base linters inherited",
                flavor.base_flavor
            );
            Vec::new()
        }
    };

    let base_linters = base_keys
        .iter()
        .map(|key| resolve_base_linter(key, corpus))
        .collect();

    let mut custom_linters = Vec::new();
    for entry in &flavor.custom_linters {
        let normalized = entry.normalize();
        match corpus.entry(normalized.linter_key.as_str()) {
            Some(catalog) => custom_linters.push(merge_override(&normalized, Some(catalog))),
            None if normalized.bare => {
                return Err(ResolveError::UnknownLinter {
                    key: normalized.linter_key.to_string(),
                });
            }
            None => match corpus.mode {
                CorpusMode::Extracted => {
                    debug!(
                        "{} not in extracted catalog, using flavor fields only",
                        normalized.linter_key
                    );
                    custom_linters.push(merge_override(&normalized, None));
                }
                CorpusMode::Static => {
                    warn!(
                        "{} not found in linter sources, skipping",
                        normalized.linter_key
                    );
                }
            },
        }
    }

    let mut all_linters = base_keys;
    for linter in &custom_linters {
        if !all_linters.contains(&linter.linter_key) {
            all_linters.push(linter.linter_key.clone());
        }
    }

    Ok(LinterManifest {
        all_linters,
        base_linters,
        custom_linters,
    })
}

fn resolve_base_linter(key: &LinterKey, corpus: &Corpus) -> BaseLinter {
    let version_command = corpus
        .entry(key.as_str())
        .and_then(|entry| entry.version_command.clone())
        .unwrap_or_else(|| format!("{} --version", key.fallback_name()));
    BaseLinter {
        linter_key: key.clone(),
        name: linter_display_name(key, Some(&version_command)),
        version_command,
    }
}

fn pick(override_value: &Option<String>, catalog_value: &Option<String>) -> Option<String> {
    override_value.clone().or_else(|| catalog_value.clone())
}

/// Field-by-field merge: override, else catalog, else absent.
pub fn merge_override(
    normalized: &NormalizedOverride,
    catalog: Option<&LinterCatalogEntry>,
) -> ResolvedLinter {
    let empty = LinterCatalogEntry::default();
    let catalog = catalog.unwrap_or(&empty);

    let version_command = pick(&normalized.version_command, &catalog.version_command);
    let name = normalized.name.clone().unwrap_or_else(|| {
        linter_display_name(&normalized.linter_key, version_command.as_deref())
    });
    let mut version = pick(&normalized.version, &catalog.version);
    let installation_type = normalized
        .installation_type
        .unwrap_or(catalog.installation_type);

    let package = || pick(&normalized.package, &catalog.package).unwrap_or_default();
    let instructions = || {
        normalized
            .instructions
            .clone()
            .unwrap_or_else(|| catalog.instructions.clone())
    };

    let installation = match installation_type {
        InstallationType::DockerBinary => {
            let mut source_image = pick(&normalized.source_image, &catalog.source_image);
            let mut digest = pick(&normalized.digest, &catalog.digest);
            if let Some(image) = &normalized.image {
                source_image = Some(image.repository.clone());
                version = Some(image.tag.clone());
                digest = image.digest.clone();
            }
            Installation::DockerBinary {
                source_image: source_image.unwrap_or_default(),
                digest,
                binary_path: pick(&normalized.binary_path, &catalog.binary_path)
                    .unwrap_or_default(),
                target_path: pick(&normalized.target_path, &catalog.target_path),
            }
        }
        InstallationType::Npm => Installation::Npm { package: package() },
        InstallationType::Pip => Installation::Pip { package: package() },
        InstallationType::Go => Installation::Go { package: package() },
        InstallationType::Cargo => Installation::Cargo { package: package() },
        InstallationType::Gem => Installation::Gem { package: package() },
        InstallationType::Script => Installation::Script {
            instructions: instructions(),
        },
        InstallationType::Dockerfile => Installation::Dockerfile {
            instructions: instructions(),
        },
        InstallationType::Unspecified => Installation::Unspecified,
    };

    ResolvedLinter {
        linter_key: normalized.linter_key.clone(),
        name,
        version,
        version_command,
        description: normalized
            .description
            .clone()
            .or_else(|| catalog.description.clone())
            .unwrap_or_default(),
        installation,
        system_dependencies: catalog.system_dependencies.clone(),
    }
}
