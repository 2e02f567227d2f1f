//! Configuration loading and the single-command preparation entry point

use super::schema::PrepareSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};
use crate::pipeline::{self, PipelineReport};
use std::fs;
use std::path::Path;

/// Load a preparation spec from a YAML file and validate it.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<PrepareSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let spec: PrepareSpec = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;

    validate_config(&spec).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    Ok(spec)
}

/// Run the full preparation pipeline from a YAML configuration file.
///
/// Loads and validates the config, then loads, shuffles, splits, formats,
/// and writes every configured dataset.
pub fn prepare_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<PipelineReport> {
    let spec = load_config(config_path)?;
    pipeline::run(&spec)
}
