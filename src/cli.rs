use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flavor-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build custom MegaLinter flavors from a flavor.yaml")]
#[command(long_about = "Resolves a declarative flavor definition against the MegaLinter linter catalog and generates the Dockerfile, smoke test script and metadata record of a custom flavor image.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Where the linter catalog is read from. Defaults to the configured linter sources file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusArgs {
    /// Static catalog file (linter-sources.yaml)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["descriptors", "fetch"])]
    pub sources: Option<PathBuf>,

    /// Directory of *.megalinter-descriptor.yml files to extract the catalog from
    #[arg(long, value_name = "DIR", conflicts_with = "fetch")]
    pub descriptors: Option<PathBuf>,

    /// Fetch descriptors from the upstream repository with a sparse git checkout
    #[arg(long)]
    pub fetch: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Dockerfile, test.sh and metadata.yaml for a flavor
    Generate {
        /// Flavor directory containing flavor.yaml
        #[arg(value_name = "FLAVOR_DIR")]
        path: PathBuf,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Directory whose templates replace the built-in ones
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,

        /// Print the rendered files instead of writing them
        #[arg(long)]
        dry_run: bool,

        /// Fail when a custom linter is missing required installation fields
        #[arg(long)]
        strict: bool,
    },

    /// Show the resolved linter manifest of a flavor
    Resolve {
        /// Flavor directory containing flavor.yaml
        #[arg(value_name = "FLAVOR_DIR")]
        path: PathBuf,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Extract the linter catalog from MegaLinter descriptors
    Extract {
        /// Directory of *.megalinter-descriptor.yml files
        #[arg(long, value_name = "DIR", conflicts_with = "fetch", required_unless_present = "fetch")]
        descriptors: Option<PathBuf>,

        /// Fetch descriptors from the upstream repository
        #[arg(long)]
        fetch: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: CatalogFormat,

        /// Write the catalog to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List base flavors and their linter counts
    Flavors {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogFormat {
    Yaml,
    Json,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
