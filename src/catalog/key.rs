use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identifier joining a descriptor and one of its linters,
/// e.g. `ACTION_ACTIONLINT` or `MARKDOWN_MARKDOWN_LINK_CHECK`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinterKey(String);

impl LinterKey {
    /// Wrap an already-formed key as written in a flavor or catalog file.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build the key from a descriptor id and a linter name.
    pub fn from_parts(descriptor_id: &str, linter_name: &str) -> Self {
        Self(format!(
            "{}_{}",
            normalize_segment(descriptor_id),
            normalize_segment(linter_name)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last underscore-separated segment, as written.
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('_').next().unwrap_or(&self.0)
    }

    /// Token used to match build stages: last segment, lower-cased, without hyphens.
    pub fn token(&self) -> String {
        self.last_segment().to_lowercase().replace('-', "")
    }

    /// Executable name guessed from the key when nothing better is known.
    pub fn fallback_name(&self) -> String {
        self.last_segment().to_lowercase()
    }

    /// The key with hyphens normalized to underscores.
    pub fn underscored(&self) -> String {
        self.0.replace('-', "_")
    }
}

fn normalize_segment(segment: &str) -> String {
    segment.to_uppercase().replace('-', "_")
}

impl fmt::Display for LinterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LinterKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LinterKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LinterKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
