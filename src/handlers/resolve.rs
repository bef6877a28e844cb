use crate::cli::{CorpusArgs, OutputFormat};
use crate::config::Config;
use crate::error::{FactoryError, Result};
use crate::handlers::corpus::load_corpus;
use crate::resolver::{load_flavor, resolve, Installation, LinterManifest, ResolvedLinter};
use colored::Colorize;
use std::path::Path;

pub fn handle_resolve(
    path: &Path,
    corpus_args: &CorpusArgs,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    let flavor = load_flavor(path)?;
    let corpus = load_corpus(corpus_args, config)?;
    let manifest = resolve(&flavor, &corpus)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&manifest)
                .map_err(|e| FactoryError::Serialization(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Table => print_manifest(flavor.display_name(), &flavor.base_flavor, &manifest),
    }
    Ok(())
}

fn print_manifest(name: &str, base_flavor: &str, manifest: &LinterManifest) {
    println!(
        "📋 {} (base: {}, {} linters)",
        name.bold(),
        base_flavor,
        manifest.all_linters.len()
    );

    println!("\n{}", "Base linters".underline());
    for linter in &manifest.base_linters {
        println!("  {:<36} {}", linter.linter_key.as_str(), linter.version_command.dimmed());
    }

    println!("\n{}", "Custom linters".underline());
    if manifest.custom_linters.is_empty() {
        println!("  (none)");
    }
    for linter in &manifest.custom_linters {
        let missing = linter.missing_fields();
        let status = if missing.is_empty() {
            "✓".green().to_string()
        } else {
            format!("missing {}", missing.join(", ")).yellow().to_string()
        };
        println!(
            "  {:<36} {:<14} {} {}",
            linter.linter_key.as_str(),
            linter.installation_type().to_string(),
            describe_installation(linter),
            status
        );
    }
}

fn describe_installation(linter: &ResolvedLinter) -> String {
    let version = linter.version.as_deref().unwrap_or("-");
    match &linter.installation {
        Installation::DockerBinary {
            source_image,
            digest,
            ..
        } => match digest {
            Some(digest) => format!("{}:{}@{}", source_image, version, digest),
            None => format!("{}:{}", source_image, version),
        },
        Installation::Script { instructions } | Installation::Dockerfile { instructions } => {
            format!("{} instruction line(s)", instructions.len())
        }
        Installation::Unspecified => "-".to_string(),
        other => format!("{} {}", other.package().unwrap_or_default(), version),
    }
}
