//! The static `linter-sources.yaml` catalog file.

use super::key::LinterKey;
use super::types::{Corpus, CorpusMode, LinterCatalogEntry};
use crate::error::{FactoryError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// On-disk shape of a static catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinterSourcesFile {
    #[serde(default)]
    pub base_flavor_linters: BTreeMap<String, Vec<LinterKey>>,
    #[serde(default)]
    pub custom_linters: BTreeMap<LinterKey, LinterCatalogEntry>,
}

/// Load a static catalog from disk.
pub fn load_linter_sources(path: &Path) -> Result<Corpus> {
    if !path.is_file() {
        return Err(FactoryError::missing(path));
    }
    let content = fs::read_to_string(path)?;
    parse_linter_sources(&content, path)
}

/// Parse static catalog content. `path` is only used for error messages.
pub fn parse_linter_sources(content: &str, path: &Path) -> Result<Corpus> {
    let file: LinterSourcesFile = if content.trim().is_empty() {
        LinterSourcesFile::default()
    } else {
        serde_yaml::from_str::<Option<LinterSourcesFile>>(content)
            .map_err(|e| FactoryError::malformed(path, e))?
            .unwrap_or_default()
    };

    let mut corpus = Corpus::new(CorpusMode::Static);
    for (key, mut entry) in file.custom_linters {
        entry.linter_key = key.clone();
        corpus.linters.insert(key, entry);
    }
    corpus.base_flavor_linters = file.base_flavor_linters;

    debug!(
        "Loaded static catalog {} with {} linters and {} base flavors",
        path.display(),
        corpus.linters.len(),
        corpus.base_flavor_linters.len()
    );
    Ok(corpus)
}

impl Corpus {
    /// Convert the corpus into the static catalog file shape.
    pub fn to_sources_file(&self) -> LinterSourcesFile {
        LinterSourcesFile {
            base_flavor_linters: self.base_flavor_linters.clone(),
            custom_linters: self.linters.clone(),
        }
    }
}
