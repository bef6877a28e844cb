use std::path::{Path, PathBuf};

use flavor_factory::catalog::{load_linter_sources, InstallationType, LinterKey};
use flavor_factory::descriptor::{extract_corpus, load_descriptor_documents, FlavorTable};
use flavor_factory::error::ResolveError;
use flavor_factory::resolver::{load_flavor, resolve, FlavorSpec, Installation};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn flavor_dir() -> PathBuf {
    fixtures().join("flavors/security-plus")
}

fn keys(names: &[&str]) -> Vec<LinterKey> {
    names.iter().map(|n| LinterKey::new(*n)).collect()
}

#[test]
fn test_empty_ci_light_flavor_matches_membership() {
    let corpus = load_linter_sources(&fixtures().join("linter-sources.yaml")).unwrap();
    let manifest = resolve(&FlavorSpec::default(), &corpus).unwrap();

    assert_eq!(
        manifest.all_linters.as_slice(),
        corpus.base_linters("ci_light").unwrap()
    );
    assert!(manifest.custom_linters.is_empty());
}

#[test]
fn test_static_catalog_resolution() {
    let corpus = load_linter_sources(&fixtures().join("linter-sources.yaml")).unwrap();
    let flavor = load_flavor(&flavor_dir()).unwrap();
    let manifest = resolve(&flavor, &corpus).unwrap();

    // CUSTOM_NOT_CATALOGED is skipped for a static catalog
    assert_eq!(
        manifest.all_linters,
        keys(&[
            "DOCKERFILE_HADOLINT",
            "REPOSITORY_GIT_DIFF",
            "REPOSITORY_TRIVY",
            "API_SPECTRAL",
            "PYTHON_BLACK",
        ])
    );
    assert_eq!(manifest.custom_linters.len(), 3);

    let git_diff = &manifest.base_linters[1];
    assert_eq!(git_diff.name, "diff");
    assert_eq!(git_diff.version_command, "diff --version");

    let black = &manifest.custom_linters[1];
    assert_eq!(black.version.as_deref(), Some("24.8.0"));
    assert_eq!(black.installation.package(), Some("black"));

    let trivy = &manifest.custom_linters[2];
    assert_eq!(trivy.version.as_deref(), Some("0.53.0"));
    assert_eq!(
        trivy.installation,
        Installation::DockerBinary {
            source_image: "aquasec/trivy".to_string(),
            digest: Some("sha256:4f2b".to_string()),
            binary_path: "/usr/local/bin/trivy".to_string(),
            target_path: Some("/usr/bin/trivy".to_string()),
        }
    );
}

#[test]
fn test_extracted_corpus_resolution_keeps_uncataloged_overrides() {
    let documents = load_descriptor_documents(&fixtures().join("descriptors")).unwrap();
    let corpus = extract_corpus(&documents, &FlavorTable::megalinter_defaults());
    let flavor = load_flavor(&flavor_dir()).unwrap();
    let manifest = resolve(&flavor, &corpus).unwrap();

    let custom = manifest
        .custom_linters
        .iter()
        .find(|l| l.linter_key.as_str() == "CUSTOM_NOT_CATALOGED")
        .unwrap();
    assert_eq!(custom.installation_type(), InstallationType::Go);
    assert_eq!(custom.installation.package(), Some("example.com/tools/lint"));
    assert_eq!(custom.name, "cataloged");
    assert!(custom.missing_fields().is_empty());
    assert_eq!(manifest.all_linters.len(), 6);
}

#[test]
fn test_resolution_is_idempotent() {
    let corpus = load_linter_sources(&fixtures().join("linter-sources.yaml")).unwrap();
    let flavor = load_flavor(&flavor_dir()).unwrap();

    let first = resolve(&flavor, &corpus).unwrap();
    let second = resolve(&flavor, &corpus).unwrap();
    assert_eq!(
        serde_json::to_vec(&first.custom_linters).unwrap(),
        serde_json::to_vec(&second.custom_linters).unwrap()
    );
}

#[test]
fn test_bare_key_missing_from_catalog_fails() {
    let corpus = load_linter_sources(&fixtures().join("linter-sources.yaml")).unwrap();
    let flavor = FlavorSpec::from_yaml_str(
        "custom_linters:\n  - SQL_SQLFLUFF\n",
        Path::new("flavor.yaml"),
    )
    .unwrap();
    match resolve(&flavor, &corpus) {
        Err(ResolveError::UnknownLinter { key }) => assert_eq!(key, "SQL_SQLFLUFF"),
        other => panic!("Expected unknown linter error, got {:?}", other),
    }
}
