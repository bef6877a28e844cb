use crate::catalog::{load_linter_sources, Corpus};
use crate::cli::CorpusArgs;
use crate::config::Config;
use crate::descriptor::{
    extract_corpus, load_descriptor_documents, DescriptorSource, FlavorTable, GitSparseCheckout,
    LocalDirectory,
};
use crate::error::Result;
use log::info;

/// Flavor table from configuration, else the built-in MegaLinter list.
pub fn flavor_table(config: &Config) -> FlavorTable {
    match &config.extraction.flavors {
        Some(names) => FlavorTable::new(names),
        None => FlavorTable::megalinter_defaults(),
    }
}

pub fn git_source(config: &Config) -> GitSparseCheckout {
    GitSparseCheckout::new(&config.sources.repository, config.sources.cache_dir())
        .with_subdir(&config.sources.descriptors_subdir)
}

/// Extract a corpus from whatever directory `source` supplies.
pub fn extract_from(source: &dyn DescriptorSource, config: &Config) -> Result<Corpus> {
    let dir = source.descriptors_dir()?;
    let documents = load_descriptor_documents(&dir)?;
    Ok(extract_corpus(&documents, &flavor_table(config)))
}

/// Build the corpus the corpus flags ask for.
pub fn load_corpus(args: &CorpusArgs, config: &Config) -> Result<Corpus> {
    if let Some(dir) = &args.descriptors {
        info!("Extracting catalog from {}", dir.display());
        return extract_from(&LocalDirectory::new(dir), config);
    }
    if args.fetch {
        info!("Fetching descriptors from {}", config.sources.repository);
        return extract_from(&git_source(config), config);
    }

    let path = args
        .sources
        .as_ref()
        .unwrap_or(&config.sources.linter_sources);
    info!("Loading linter sources from {}", path.display());
    load_linter_sources(path)
}
