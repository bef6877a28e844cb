use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Required input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to parse {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Descriptor retrieval failed: {0}")]
    Fetch(String),

    #[error("Template rendering failed: {0}")]
    Render(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Linter {key} is not present in the catalog")]
    UnknownLinter { key: String },

    #[error("Linter {key} ({linter_type}) is missing required fields: {}", fields.join(", "))]
    MissingFields {
        key: String,
        linter_type: String,
        fields: Vec<&'static str>,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),
}

impl FactoryError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }
}

pub type Result<T> = std::result::Result<T, FactoryError>;
