use std::path::PathBuf;

use flavor_factory::catalog::{parse_linter_sources, InstallationType, LinterKey};
use flavor_factory::descriptor::{
    extract_corpus, load_descriptor_documents, DescriptorSource, FlavorTable, LocalDirectory,
};
use flavor_factory::CorpusMode;

fn descriptors_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/descriptors")
}

fn keys(names: &[&str]) -> Vec<LinterKey> {
    names.iter().map(|n| LinterKey::new(*n)).collect()
}

#[test]
fn test_extracts_catalog_from_descriptor_directory() {
    let dir = LocalDirectory::new(descriptors_dir()).descriptors_dir().unwrap();
    let documents = load_descriptor_documents(&dir).unwrap();
    assert_eq!(documents.len(), 4);

    let corpus = extract_corpus(&documents, &FlavorTable::megalinter_defaults());
    assert_eq!(corpus.mode, CorpusMode::Extracted);

    let hadolint = corpus.entry("DOCKERFILE_HADOLINT").unwrap();
    assert_eq!(hadolint.installation_type, InstallationType::DockerBinary);
    assert_eq!(hadolint.source_image.as_deref(), Some("hadolint/hadolint"));
    assert_eq!(hadolint.version.as_deref(), Some("v2.12.0-alpine"));
    assert_eq!(hadolint.binary_path.as_deref(), Some("/bin/hadolint"));
    assert_eq!(hadolint.target_path.as_deref(), Some("/usr/bin/hadolint"));
    assert_eq!(hadolint.version_command.as_deref(), Some("hadolint --version"));

    let spectral = corpus.entry("API_SPECTRAL").unwrap();
    assert_eq!(spectral.installation_type, InstallationType::Npm);
    assert_eq!(spectral.package.as_deref(), Some("@stoplight/spectral-cli"));
    assert_eq!(spectral.version.as_deref(), Some("6.11.1"));

    let black = corpus.entry("PYTHON_BLACK").unwrap();
    assert_eq!(black.installation_type, InstallationType::Pip);
    assert_eq!(black.package.as_deref(), Some("black"));
    assert_eq!(black.version.as_deref(), Some("24.4.2"));
    assert_eq!(black.system_dependencies, vec!["gcc"]);

    let pyright = corpus.entry("PYTHON_PYRIGHT").unwrap();
    assert_eq!(pyright.package.as_deref(), Some("pyright"));
    assert!(pyright.version.is_none());
    assert_eq!(pyright.system_dependencies, vec!["gcc"]);

    let trivy = corpus.entry("REPOSITORY_TRIVY").unwrap();
    assert_eq!(trivy.system_dependencies, vec!["git"]);

    // no install recipe at all
    assert!(corpus.entry("REPOSITORY_GIT_DIFF").is_none());
}

#[test]
fn test_flavor_membership_honors_exclusion_lists() {
    let documents = load_descriptor_documents(&descriptors_dir()).unwrap();
    let corpus = extract_corpus(&documents, &FlavorTable::megalinter_defaults());

    assert_eq!(corpus.base_flavor_linters.len(), 18);
    assert_eq!(
        corpus.base_linters("ci_light").unwrap(),
        keys(&["DOCKERFILE_HADOLINT", "REPOSITORY_TRIVY", "REPOSITORY_GIT_DIFF"]).as_slice()
    );
    assert_eq!(
        corpus.base_linters("python").unwrap(),
        keys(&[
            "API_SPECTRAL",
            "DOCKERFILE_HADOLINT",
            "PYTHON_BLACK",
            "PYTHON_PYRIGHT",
            "REPOSITORY_TRIVY",
            "REPOSITORY_GIT_DIFF",
        ])
        .as_slice()
    );
}

#[test]
fn test_custom_flavor_table() {
    let documents = load_descriptor_documents(&descriptors_dir()).unwrap();
    let corpus = extract_corpus(&documents, &FlavorTable::new(["python", "python"]));
    assert_eq!(corpus.flavors().collect::<Vec<_>>(), vec!["python"]);
}

#[test]
fn test_extracted_corpus_reloads_as_static_catalog() {
    let documents = load_descriptor_documents(&descriptors_dir()).unwrap();
    let corpus = extract_corpus(&documents, &FlavorTable::megalinter_defaults());

    let yaml = serde_yaml::to_string(&corpus.to_sources_file()).unwrap();
    let reloaded = parse_linter_sources(&yaml, std::path::Path::new("linter-sources.yaml")).unwrap();

    assert_eq!(reloaded.mode, CorpusMode::Static);
    assert_eq!(reloaded.linters, corpus.linters);
    assert_eq!(reloaded.base_flavor_linters, corpus.base_flavor_linters);
}
