//! # Linter Catalog
//!
//! Linter identity, installation types, catalog entries and the corpus that
//! resolution reads from. A corpus is either extracted from upstream
//! descriptors or loaded from a static `linter-sources.yaml`.

pub mod key;
pub mod sources;
pub mod types;

pub use key::LinterKey;
pub use sources::{load_linter_sources, parse_linter_sources, LinterSourcesFile};
pub use types::{Corpus, CorpusMode, InstallationType, LinterCatalogEntry};
