//! # Flavor Factory
//!
//! Builds custom MegaLinter flavors. A flavor definition (`flavor.yaml`) names
//! a base flavor and a list of custom linters; the factory resolves it against
//! a linter catalog and renders the image build files.
//!
//! ## Features
//!
//! - **Catalog extraction**: Reads upstream `*.megalinter-descriptor.yml` files and
//!   recovers image, version and binary paths from their Dockerfile instructions
//! - **Static catalogs**: Loads a hand-maintained `linter-sources.yaml` instead
//! - **Resolution**: Merges custom linter overrides with catalog defaults across
//!   both generations of the flavor file format
//! - **Generation**: Renders `Dockerfile`, `test.sh` and a write-once `metadata.yaml`
//!
//! ## Example
//!
//! ```rust,no_run
//! use flavor_factory::{catalog::load_linter_sources, resolver::{load_flavor, resolve}};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let corpus = load_linter_sources(Path::new("linter-sources.yaml"))?;
//! let flavor = load_flavor(Path::new("flavors/python-plus"))?;
//! let manifest = resolve(&flavor, &corpus)?;
//! println!("{} linters", manifest.all_linters.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod resolver;

// Re-export commonly used types and functions
pub use catalog::{Corpus, CorpusMode, InstallationType, LinterCatalogEntry, LinterKey};
pub use descriptor::{extract_corpus, FlavorTable, ImageReference};
pub use error::{FactoryError, Result};
pub use generator::FlavorGenerator;
pub use resolver::{resolve, FlavorSpec, LinterManifest, ResolvedLinter};

use cli::Commands;
use config::Config;
use std::path::Path;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for a command: the explicit file if given, else the
/// flavor directory's, else the global one.
pub fn load_command_config(explicit: Option<&Path>, command: &Commands) -> Result<Config> {
    if let Some(path) = explicit {
        return config::load_config_file(path);
    }
    let flavor_dir = match command {
        Commands::Generate { path, .. } | Commands::Resolve { path, .. } => Some(path.as_path()),
        Commands::Extract { .. } | Commands::Flavors { .. } => None,
    };
    config::load_config(flavor_dir)
}

pub fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate {
            path,
            corpus,
            templates,
            dry_run,
            strict,
        } => handlers::handle_generate(
            &path,
            handlers::GenerateOptions {
                corpus,
                templates,
                dry_run,
                strict,
            },
            config,
        ),
        Commands::Resolve {
            path,
            corpus,
            format,
        } => handlers::handle_resolve(&path, &corpus, format, config),
        Commands::Extract {
            descriptors,
            fetch,
            format,
            output,
        } => handlers::handle_extract(descriptors, fetch, format, output, config),
        Commands::Flavors { corpus } => handlers::handle_flavors(&corpus, config),
    }
}
