//! Configuration loading errors

use std::path::PathBuf;
use thiserror::Error;

use super::validate::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
