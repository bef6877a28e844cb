use crate::descriptor::source::{DESCRIPTORS_SUBDIR, MEGALINTER_REPOSITORY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub generation: GenerationConfig,
    pub extraction: ExtractionConfig,
}

/// Where catalog data comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub repository: String,
    pub descriptors_subdir: String,
    pub cache_dir: Option<PathBuf>,
    pub linter_sources: PathBuf,
}

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub templates_dir: Option<PathBuf>,
    pub default_upstream_version: String,
    /// Fail instead of warn when a custom linter lacks required fields.
    pub strict: bool,
}

/// Extraction configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Replaces the built-in flavor table when set.
    pub flavors: Option<Vec<String>>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            repository: MEGALINTER_REPOSITORY.to_string(),
            descriptors_subdir: DESCRIPTORS_SUBDIR.to_string(),
            cache_dir: None,
            linter_sources: PathBuf::from("linter-sources.yaml"),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            default_upstream_version: "v9.0.0".to_string(),
            strict: false,
        }
    }
}

impl SourcesConfig {
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("flavor-factory")
        })
    }
}

impl Config {
    /// Make relative paths relative to `base` (the directory holding the config file).
    pub fn anchored_at(mut self, base: &Path) -> Self {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        anchor(&mut self.sources.linter_sources);
        if let Some(cache_dir) = self.sources.cache_dir.as_mut() {
            anchor(cache_dir);
        }
        if let Some(templates_dir) = self.generation.templates_dir.as_mut() {
            anchor(templates_dir);
        }
        self
    }
}
