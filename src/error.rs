use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the dragon-env library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("required env file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read env file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read env content: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse env file '{path}': {source}")]
    Dotenv {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("failed to parse env content: {0}")]
    Parse(#[source] dotenvy::Error),

    #[error("invalid environment variable name: {0:?}")]
    InvalidKey(String),

    #[error("invalid value for environment variable {0}: contains NUL")]
    InvalidValue(String),

    #[error("failed to encode JSON value: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode environment: {0}")]
    Decode(#[from] config::ConfigError),
}
