//! Error types for Preparar

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required file or directory: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("Failed to parse {}: {source}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported data shape in {}: root must be a JSON object or array", .0.display())]
    UnsupportedShape(PathBuf),

    #[error("Invalid record in {} at {location}: {reason}", file.display())]
    InvalidRecord {
        file: PathBuf,
        location: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("External trainer failed: {0}")]
    TrainerFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
