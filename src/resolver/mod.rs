//! # Linter Resolution
//!
//! Combines a flavor definition with a corpus into the ordered linter
//! manifest handed to the generator.

pub mod flavor;
pub mod resolve;

pub use flavor::{
    load_flavor, CustomLinterEntry, FlavorSpec, LinterOverride, NormalizedOverride,
    DEFAULT_BASE_FLAVOR, FLAVOR_FILE_NAME,
};
pub use resolve::{
    linter_display_name, merge_override, resolve, BaseLinter, Installation, LinterManifest,
    ResolvedLinter,
};
