//! YAML configuration loading

use std::fs;
use std::path::Path;

use super::error::{ConfigError, Result};
use super::schema::EngineConfig;
use super::validate::validate_config;

/// Load and validate an engine configuration file
///
/// ```no_run
/// use medida::config::load_config;
///
/// let config = load_config("medida.yaml")?;
/// let validator = config.validator();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let yaml = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let config = parse_config(&yaml)
        .map_err(|e| ConfigError::Parse { path: path.to_path_buf(), message: e.to_string() })?;

    validate_config(&config)?;
    tracing::debug!(path = %path.display(), metrics = config.metrics.len(), "config loaded");
    Ok(config)
}

/// Parse a configuration document without validating it
pub fn parse_config(yaml: &str) -> std::result::Result<EngineConfig, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}
