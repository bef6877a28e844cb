pub mod types;

use crate::error::{ConfigError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub use types::Config;

const CONFIG_FILE_NAME: &str = ".flavor-factory.toml";

/// Get the global config file path (~/.flavor-factory.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (flavor/.flavor-factory.toml)
pub fn local_config_path(flavor_dir: &Path) -> PathBuf {
    flavor_dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from file or use defaults.
/// Checks the flavor directory first, then the global config.
pub fn load_config(flavor_dir: Option<&Path>) -> Result<Config> {
    let candidates = flavor_dir
        .map(local_config_path)
        .into_iter()
        .chain(global_config_path());

    for path in candidates {
        if path.exists() {
            return load_config_file(&path);
        }
    }

    debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    Ok(Config::default())
}

/// Load one configuration file; relative paths inside it are taken from its directory.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config = parse_config(&content)?;
    debug!("Loaded configuration from {}", path.display());

    let base = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(config.anchored_at(base))
}

pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}
