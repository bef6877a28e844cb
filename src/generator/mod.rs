//! # Flavor File Generation
//!
//! Renders a resolved [`LinterManifest`] into the build file, the smoke test
//! script and the metadata record of a flavor directory.

pub mod metadata;

use crate::catalog::InstallationType;
use crate::descriptor::ImageReference;
use crate::error::Result;
use crate::resolver::flavor::UPSTREAM_REPOSITORY_PREFIX;
use crate::resolver::{FlavorSpec, LinterManifest};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

pub use metadata::{initial_version, render_metadata, FlavorMetadata};

pub const DOCKERFILE_TEMPLATE: &str = "Dockerfile.tera";
pub const TEST_SCRIPT_TEMPLATE: &str = "test.sh.tera";

pub const DOCKERFILE_NAME: &str = "Dockerfile";
pub const TEST_SCRIPT_NAME: &str = "test.sh";
pub const METADATA_NAME: &str = "metadata.yaml";

const EMBEDDED_TEMPLATES: [(&str, &str); 2] = [
    (DOCKERFILE_TEMPLATE, include_str!("templates/Dockerfile.tera")),
    (TEST_SCRIPT_TEMPLATE, include_str!("templates/test.sh.tera")),
];

/// Rendered contents of one flavor directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFlavor {
    pub dockerfile: String,
    pub test_script: String,
    pub metadata: String,
}

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// Already present and left alone.
    Kept(PathBuf),
}

pub struct FlavorGenerator {
    tera: Tera,
    default_upstream_version: String,
}

impl FlavorGenerator {
    /// Embedded templates, with any same-named file in `templates_dir` taking precedence.
    pub fn new(templates_dir: Option<&Path>, default_upstream_version: &str) -> Result<Self> {
        let mut tera = Tera::default();
        for (name, embedded) in EMBEDDED_TEMPLATES {
            let custom = templates_dir
                .map(|dir| dir.join(name))
                .filter(|path| path.is_file());
            match custom {
                Some(path) => {
                    debug!("Using template override {}", path.display());
                    let content = fs::read_to_string(&path)?;
                    tera.add_raw_template(name, &content)?;
                }
                None => tera.add_raw_template(name, embedded)?,
            }
        }
        Ok(Self {
            tera,
            default_upstream_version: default_upstream_version.to_string(),
        })
    }

    pub fn upstream_image(&self, flavor: &FlavorSpec) -> ImageReference {
        flavor.upstream().unwrap_or_else(|| ImageReference {
            repository: format!("{}{}", UPSTREAM_REPOSITORY_PREFIX, flavor.base_flavor),
            tag: self.default_upstream_version.clone(),
            digest: None,
        })
    }

    pub fn context(&self, flavor: &FlavorSpec, manifest: &LinterManifest) -> Context {
        let mut context = Context::new();
        context.insert("flavor", flavor);
        context.insert("flavor_name", flavor.display_name());
        context.insert("upstream_image", &self.upstream_image(flavor).to_string());
        context.insert("all_linters", &manifest.all_linters);
        context.insert("base_linters", &manifest.base_linters);
        context.insert("custom_linters_for_test", &manifest.custom_linters);

        for installation_type in InstallationType::ALL {
            if installation_type == InstallationType::Unspecified {
                continue;
            }
            context.insert(
                format!("{}_linters", installation_type.as_str()),
                &manifest.custom_linters_of(installation_type),
            );
        }

        let mut system_dependencies: Vec<&str> = Vec::new();
        for dependency in manifest
            .custom_linters
            .iter()
            .flat_map(|l| l.system_dependencies.iter())
        {
            if !system_dependencies.contains(&dependency.as_str()) {
                system_dependencies.push(dependency);
            }
        }
        context.insert("system_dependencies", &system_dependencies);
        context
    }

    pub fn render(&self, flavor: &FlavorSpec, manifest: &LinterManifest) -> Result<RenderedFlavor> {
        let context = self.context(flavor, manifest);
        Ok(RenderedFlavor {
            dockerfile: self.tera.render(DOCKERFILE_TEMPLATE, &context)?,
            test_script: self.tera.render(TEST_SCRIPT_TEMPLATE, &context)?,
            metadata: render_metadata(
                flavor,
                manifest,
                &initial_version(flavor, &self.default_upstream_version),
            )?,
        })
    }
}

/// Write rendered files into `flavor_dir`. `metadata.yaml` is only created, never replaced.
pub fn write_outputs(flavor_dir: &Path, rendered: &RenderedFlavor) -> Result<Vec<WriteOutcome>> {
    let dockerfile = flavor_dir.join(DOCKERFILE_NAME);
    fs::write(&dockerfile, &rendered.dockerfile)?;

    let test_script = flavor_dir.join(TEST_SCRIPT_NAME);
    fs::write(&test_script, &rendered.test_script)?;
    make_executable(&test_script)?;

    let metadata = flavor_dir.join(METADATA_NAME);
    let metadata_outcome = if metadata.exists() {
        debug!("{} exists, leaving it untouched", metadata.display());
        WriteOutcome::Kept(metadata)
    } else {
        fs::write(&metadata, &rendered.metadata)?;
        WriteOutcome::Written(metadata)
    };

    Ok(vec![
        WriteOutcome::Written(dockerfile),
        WriteOutcome::Written(test_script),
        metadata_outcome,
    ])
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
