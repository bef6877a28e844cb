use crate::cli::CatalogFormat;
use crate::config::Config;
use crate::error::{FactoryError, Result};
use crate::descriptor::LocalDirectory;
use crate::handlers::corpus::{extract_from, git_source};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Extract the catalog and print or save it in the `linter-sources.yaml` shape.
pub fn handle_extract(
    descriptors: Option<PathBuf>,
    fetch: bool,
    format: CatalogFormat,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let corpus = match (descriptors, fetch) {
        (Some(dir), _) => extract_from(&LocalDirectory::new(dir), config)?,
        (None, true) => extract_from(&git_source(config), config)?,
        (None, false) => {
            return Err(FactoryError::Fetch(
                "no descriptor source given".to_string(),
            ));
        }
    };

    let sources = corpus.to_sources_file();
    let content = match format {
        CatalogFormat::Yaml => serde_yaml::to_string(&sources)
            .map_err(|e| FactoryError::Serialization(e.to_string()))?,
        CatalogFormat::Json => serde_json::to_string_pretty(&sources)
            .map_err(|e| FactoryError::Serialization(e.to_string()))?,
    };

    match output {
        Some(path) => {
            write_catalog(&path, &content)?;
            println!(
                "✅ Wrote {} linters and {} base flavors to {}",
                corpus.linters.len(),
                corpus.base_flavor_linters.len(),
                path.display()
            );
            for (installation_type, count) in corpus.type_counts() {
                println!("    - {}: {}", installation_type, count);
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn write_catalog(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!("Catalog written to {}", path.display());
    Ok(())
}
