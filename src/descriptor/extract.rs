//! Builds the linter catalog and base flavor membership from descriptors.

use super::document::{DescriptorDocument, LinterDescriptor};
use super::flavors::FlavorTable;
use super::instructions::{find_prefixed_version, parse_instructions};
use crate::catalog::{Corpus, CorpusMode, InstallationType, LinterCatalogEntry, LinterKey};
use log::{debug, info};
use std::collections::BTreeMap;

pub const DEFAULT_VERSION_ARG: &str = "--version";

/// Extract a complete corpus from a set of descriptor documents.
pub fn extract_corpus(documents: &[DescriptorDocument], flavors: &FlavorTable) -> Corpus {
    let mut corpus = Corpus::new(CorpusMode::Extracted);
    corpus.linters = extract_linter_catalog(documents);
    corpus.base_flavor_linters = extract_base_flavor_linters(documents, flavors);

    info!(
        "Extracted {} installable linters from {} descriptors ({} base flavors)",
        corpus.linters.len(),
        documents.len(),
        corpus.base_flavor_linters.len()
    );
    corpus
}

/// Catalog entries for every linter with a recognized install strategy.
pub fn extract_linter_catalog(
    documents: &[DescriptorDocument],
) -> BTreeMap<LinterKey, LinterCatalogEntry> {
    let mut linters = BTreeMap::new();
    for document in documents {
        for linter in &document.linters {
            match build_catalog_entry(&document.descriptor_id, &document.install.apk, linter) {
                Some(entry) => {
                    debug!(
                        "{} classified as {}",
                        entry.linter_key, entry.installation_type
                    );
                    linters.insert(entry.linter_key.clone(), entry);
                }
                None => debug!(
                    "{} has no recognized install strategy, skipping",
                    LinterKey::from_parts(&document.descriptor_id, &linter.linter_name)
                ),
            }
        }
    }
    linters
}

/// Classify one linter. Precedence: docker binary, then npm, then pip.
///
/// `descriptor_apk` holds the packages the whole descriptor installs; they
/// come ahead of the linter's own.
pub fn build_catalog_entry(
    descriptor_id: &str,
    descriptor_apk: &[String],
    linter: &LinterDescriptor,
) -> Option<LinterCatalogEntry> {
    let linter_key = LinterKey::from_parts(descriptor_id, &linter.linter_name);
    let install = &linter.install;
    let dockerfile = &install.dockerfile;

    let cli_name = if linter.linter_name.is_empty() {
        linter_key.fallback_name()
    } else {
        linter.linter_name.clone()
    };
    let version_arg = linter
        .cli_version_arg_name
        .clone()
        .unwrap_or_else(|| DEFAULT_VERSION_ARG.to_string());

    let mut system_dependencies: Vec<String> = Vec::new();
    for package in descriptor_apk.iter().chain(&install.apk) {
        if !system_dependencies.contains(package) {
            system_dependencies.push(package.clone());
        }
    }

    let mut entry = LinterCatalogEntry {
        linter_key: linter_key.clone(),
        descriptor_id: Some(descriptor_id.to_uppercase()),
        display_name: (!linter.linter_name.is_empty()).then(|| linter.linter_name.clone()),
        version_command: Some(format!("{} {}", cli_name, version_arg).trim().to_string()),
        cli_version_arg_name: Some(version_arg),
        system_dependencies,
        ..Default::default()
    };

    if !dockerfile.is_empty() {
        let info = parse_instructions(dockerfile, &linter_key);
        if info.is_docker_binary() {
            entry.installation_type = InstallationType::DockerBinary;
            entry.source_image = info.source_image;
            entry.version = info.version;
            entry.binary_path = info.binary_path;
            entry.target_path = info.target_path;
            entry.stage_name = info.stage_name;
            return Some(entry);
        }
    }

    if let Some(raw_package) = install.npm.first() {
        entry.installation_type = InstallationType::Npm;
        entry.package = Some(npm_package_name(raw_package));
        entry.version = find_prefixed_version(dockerfile, "NPM");
        return Some(entry);
    }

    if let Some(raw_package) = install.pip.first() {
        entry.installation_type = InstallationType::Pip;
        entry.package = Some(pip_package_name(raw_package));
        entry.version = find_prefixed_version(dockerfile, "PIP");
        return Some(entry);
    }

    None
}

/// Package name from an npm install spec such as
/// `@stoplight/spectral-cli@${NPM_SPECTRAL_VERSION}` or `markdownlint-cli@0.39.0`.
pub fn npm_package_name(raw: &str) -> String {
    if let Some((name, _)) = raw.split_once("@${") {
        return name.to_string();
    }
    if raw.starts_with('@') && raw.matches('@').count() == 2 {
        if let Some((name, _)) = raw.rsplit_once('@') {
            return name.to_string();
        }
    }
    // a leading '@' is the scope marker, not a version separator
    match raw.char_indices().skip(1).find(|(_, c)| *c == '@') {
        Some((index, _)) => raw[..index].to_string(),
        None => raw.to_string(),
    }
}

/// Package name from a pip install spec such as `bandit@${PIP_BANDIT_VERSION}`,
/// `black[jupyter]==24.1.0` or `pylint==3.0.0`.
pub fn pip_package_name(raw: &str) -> String {
    let name = if let Some((name, _)) = raw.split_once("@${") {
        name
    } else if let Some((name, _)) = raw.split_once('[') {
        name
    } else {
        let without_pin = raw.split("==").next().unwrap_or(raw);
        without_pin.split('@').next().unwrap_or(without_pin)
    };
    name.split('[').next().unwrap_or(name).to_string()
}

/// Membership of every linter (installable or not) in each tracked flavor.
pub fn extract_base_flavor_linters(
    documents: &[DescriptorDocument],
    flavors: &FlavorTable,
) -> BTreeMap<String, Vec<LinterKey>> {
    let mut membership: BTreeMap<String, Vec<LinterKey>> = flavors
        .names()
        .iter()
        .map(|flavor| (flavor.clone(), Vec::new()))
        .collect();

    for document in documents {
        for linter in &document.linters {
            let key = LinterKey::from_parts(&document.descriptor_id, &linter.linter_name);
            for flavor in flavors.names() {
                if !is_flavor_member(linter, flavor) {
                    continue;
                }
                let members = membership.entry(flavor.clone()).or_default();
                if !members.contains(&key) {
                    members.push(key.clone());
                }
            }
        }
    }

    membership
}

/// A linter belongs to a flavor unless disabled for it, or unless it carries
/// an `only_in_flavor` list that omits it.
pub fn is_flavor_member(linter: &LinterDescriptor, flavor: &str) -> bool {
    let disabled = linter.disabled_in_flavor.iter().any(|f| f == flavor);
    let only_in = &linter.install.only_in_flavor;
    !disabled && (only_in.is_empty() || only_in.iter().any(|f| f == flavor))
}
