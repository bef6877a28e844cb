use crate::cli::CorpusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::generator::{write_outputs, FlavorGenerator, WriteOutcome};
use crate::handlers::corpus::load_corpus;
use crate::resolver::{load_flavor, resolve};
use colored::Colorize;
use log::warn;
use std::path::{Path, PathBuf};

pub struct GenerateOptions {
    pub corpus: CorpusArgs,
    pub templates: Option<PathBuf>,
    pub dry_run: bool,
    pub strict: bool,
}

pub fn handle_generate(path: &Path, options: GenerateOptions, config: &Config) -> Result<()> {
    println!("🔍 Loading flavor from {}", path.display());
    let flavor = load_flavor(path)?;
    let corpus = load_corpus(&options.corpus, config)?;

    let manifest = resolve(&flavor, &corpus)?;
    let incomplete = manifest.incomplete_linters();
    if options.strict || config.generation.strict {
        manifest.validate()?;
    } else {
        for (linter, fields) in &incomplete {
            warn!(
                "{} ({}) is missing {}",
                linter.linter_key,
                linter.installation_type(),
                fields.join(", ")
            );
        }
    }

    let templates_dir = options
        .templates
        .as_deref()
        .or(config.generation.templates_dir.as_deref());
    let generator =
        FlavorGenerator::new(templates_dir, &config.generation.default_upstream_version)?;
    let rendered = generator.render(&flavor, &manifest)?;

    if options.dry_run {
        println!("--- Dockerfile (dry run) ---");
        println!("{}", rendered.dockerfile);
        println!("--- test.sh (dry run) ---");
        println!("{}", rendered.test_script);
        println!("--- metadata.yaml (dry run, only written when absent) ---");
        println!("{}", rendered.metadata);
        return Ok(());
    }

    for outcome in write_outputs(path, &rendered)? {
        match outcome {
            WriteOutcome::Written(file) => println!("✅ Generated: {}", file.display()),
            WriteOutcome::Kept(file) => {
                println!("⏭️  Kept existing: {}", file.display().to_string().dimmed())
            }
        }
    }

    println!(
        "\n🎉 Generated files for {} flavor",
        flavor.display_name().bold()
    );
    println!("  Base flavor: {}", flavor.base_flavor);
    println!("  Total linters: {}", manifest.all_linters.len());
    println!("    - Base: {}", manifest.base_linters.len());
    println!("    - Custom: {}", manifest.custom_linters.len());
    if !incomplete.is_empty() {
        println!(
            "  {} {} custom linter(s) have missing fields (see warnings)",
            "⚠️".yellow(),
            incomplete.len()
        );
    }
    Ok(())
}
