use crate::cli::CorpusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::corpus::load_corpus;
use colored::Colorize;

pub fn handle_flavors(corpus_args: &CorpusArgs, config: &Config) -> Result<()> {
    let corpus = load_corpus(corpus_args, config)?;

    println!("🧩 Base flavors:");
    let mut flavors = corpus.base_flavor_linters.iter().peekable();
    if flavors.peek().is_none() {
        println!("└── (none)");
    }
    while let Some((flavor, linters)) = flavors.next() {
        let branch = if flavors.peek().is_some() { "├──" } else { "└──" };
        println!("{} {:<16} {} linters", branch, flavor.cyan(), linters.len());
    }

    println!("\n📦 Catalog: {} linters", corpus.linters.len());
    for (installation_type, count) in corpus.type_counts() {
        println!("    - {}: {}", installation_type, count);
    }
    Ok(())
}
