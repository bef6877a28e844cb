use crate::error::{FactoryError, Result};
use crate::resolver::{FlavorSpec, LinterManifest};
use serde::{Deserialize, Serialize};

/// Body of `metadata.yaml`. After creation, `version` belongs to the patching automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorMetadata {
    pub version: String,
    pub auto_patch: bool,
}

/// Upstream tag of the flavor, else the configured default.
pub fn initial_version(flavor: &FlavorSpec, default_upstream_version: &str) -> String {
    flavor
        .upstream()
        .map(|upstream| upstream.tag)
        .unwrap_or_else(|| default_upstream_version.to_string())
}

pub fn render_metadata(flavor: &FlavorSpec, manifest: &LinterManifest, version: &str) -> Result<String> {
    let body = serde_yaml::to_string(&FlavorMetadata {
        version: version.to_string(),
        auto_patch: true,
    })
    .map_err(|e| FactoryError::Serialization(e.to_string()))?;

    let linters: Vec<&str> = manifest.all_linters.iter().map(|k| k.as_str()).collect();
    let mut out = String::from("---\n");
    out.push_str(&format!("# Custom MegaLinter flavor: {}\n", flavor.display_name()));
    if let Some(description) = &flavor.description {
        out.push_str(&format!("# {}\n", description));
    }
    out.push_str("#\n# Generated from flavor.yaml by flavor-ctl on first run only.\n");
    out.push_str(&format!("#\n# Included linters ({}):\n", linters.len()));
    if !linters.is_empty() {
        out.push_str(&format!("# - {}\n", linters.join(", ")));
    }
    out.push('\n');
    out.push_str(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LinterKey;

    fn manifest() -> LinterManifest {
        LinterManifest {
            all_linters: vec![LinterKey::new("DOCKERFILE_HADOLINT"), LinterKey::new("PYTHON_BLACK")],
            base_linters: Vec::new(),
            custom_linters: Vec::new(),
        }
    }

    #[test]
    fn test_initial_version_sources() {
        let combined = FlavorSpec {
            upstream_image: Some("oxsecurity/megalinter-ci_light:v9.1.0".to_string()),
            upstream_version: Some("v8.0.0".to_string()),
            ..Default::default()
        };
        assert_eq!(initial_version(&combined, "v9.0.0"), "v9.1.0");

        let legacy = FlavorSpec {
            upstream_version: Some("v8.0.0".to_string()),
            ..Default::default()
        };
        assert_eq!(initial_version(&legacy, "v9.0.0"), "v8.0.0");
        assert_eq!(initial_version(&FlavorSpec::default(), "v9.0.0"), "v9.0.0");
    }

    #[test]
    fn test_metadata_parses_back() {
        let flavor = FlavorSpec {
            name: Some("python-plus".to_string()),
            description: Some("ci_light with python tools".to_string()),
            ..Default::default()
        };
        let content = render_metadata(&flavor, &manifest(), "v9.0.0").unwrap();
        assert!(content.starts_with("---\n# Custom MegaLinter flavor: python-plus\n"));
        assert!(content.contains("# - DOCKERFILE_HADOLINT, PYTHON_BLACK\n"));

        let metadata: FlavorMetadata = serde_yaml::from_str(&content).unwrap();
        assert_eq!(
            metadata,
            FlavorMetadata {
                version: "v9.0.0".to_string(),
                auto_patch: true
            }
        );
    }
}
