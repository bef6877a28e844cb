//! Where descriptor documents come from.

use super::document::DescriptorDocument;
use crate::error::{FactoryError, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

pub const DESCRIPTOR_SUFFIX: &str = ".megalinter-descriptor.yml";
pub const MEGALINTER_REPOSITORY: &str = "https://github.com/oxsecurity/megalinter.git";
pub const DESCRIPTORS_SUBDIR: &str = "megalinter/descriptors";

/// Supplies a directory of descriptor documents.
pub trait DescriptorSource {
    fn descriptors_dir(&self) -> Result<PathBuf>;
}

/// Descriptors already present on disk.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    pub path: PathBuf,
}

impl LocalDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DescriptorSource for LocalDirectory {
    fn descriptors_dir(&self) -> Result<PathBuf> {
        if !self.path.is_dir() {
            return Err(FactoryError::missing(&self.path));
        }
        Ok(self.path.clone())
    }
}

/// Fresh shallow sparse checkout of the descriptor directory of a git repository.
#[derive(Debug, Clone)]
pub struct GitSparseCheckout {
    pub repository: String,
    pub cache_dir: PathBuf,
    pub subdir: String,
}

impl GitSparseCheckout {
    pub fn new(repository: impl Into<String>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            cache_dir: cache_dir.into(),
            subdir: DESCRIPTORS_SUBDIR.to_string(),
        }
    }

    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = subdir.into();
        self
    }

    fn checkout_dir(&self) -> PathBuf {
        self.cache_dir.join("megalinter")
    }
}

impl DescriptorSource for GitSparseCheckout {
    fn descriptors_dir(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.cache_dir)?;
        let checkout = self.checkout_dir();

        // stale checkouts are replaced, never updated
        if checkout.exists() {
            fs::remove_dir_all(&checkout)?;
        }

        info!("Cloning descriptors from {}", self.repository);
        let checkout_str = checkout.to_string_lossy().to_string();
        run_git(&[
            "clone",
            "--depth=1",
            "--filter=blob:none",
            "--sparse",
            &self.repository,
            &checkout_str,
        ])?;
        run_git(&["-C", &checkout_str, "sparse-checkout", "set", &self.subdir])?;

        let dir = checkout.join(&self.subdir);
        if !dir.is_dir() {
            return Err(FactoryError::missing(dir));
        }
        Ok(dir)
    }
}

fn run_git(args: &[&str]) -> Result<()> {
    debug!("Executing command: git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|e| FactoryError::Fetch(format!("failed to run git: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(FactoryError::Fetch(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )))
    }
}

/// Paths of all descriptor documents directly under `dir`, sorted by file name.
pub fn descriptor_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FactoryError::missing(dir));
    }
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(DESCRIPTOR_SUFFIX))
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Load and parse every descriptor document in `dir`.
pub fn load_descriptor_documents(dir: &Path) -> Result<Vec<DescriptorDocument>> {
    let paths = descriptor_paths(dir)?;
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path)?;
        documents.push(DescriptorDocument::from_yaml_str(&content, &path)?);
    }
    debug!("Loaded {} descriptor documents from {}", documents.len(), dir.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loads_only_descriptor_files_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("python.megalinter-descriptor.yml"),
            "descriptor_id: PYTHON\nlinters:\n  - linter_name: pylint\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("action.megalinter-descriptor.yml"),
            "descriptor_id: ACTION\nlinters: []\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("README.md"), "# not a descriptor").unwrap();

        let documents = load_descriptor_documents(temp_dir.path()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].descriptor_id, "ACTION");
        assert_eq!(documents[1].descriptor_id, "PYTHON");
    }

    #[test]
    fn test_malformed_descriptor_aborts() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("bad.megalinter-descriptor.yml"),
            "linters: [",
        )
        .unwrap();
        let err = load_descriptor_documents(temp_dir.path()).unwrap_err();
        assert!(matches!(err, FactoryError::MalformedInput { .. }));
    }

    #[test]
    fn test_local_directory_must_exist() {
        let source = LocalDirectory::new("/nonexistent/descriptors");
        assert!(matches!(
            source.descriptors_dir(),
            Err(FactoryError::MissingInput { .. })
        ));
    }
}
