//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON document could not be parsed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML document could not be parsed
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The decision diagram failed validation
    #[error("Invalid decision diagram: {0}")]
    DiagramError(#[from] waypoint_core::CoreError),

    /// Resolution error
    #[error(transparent)]
    ResolveError(#[from] waypoint_runtime::ResolveError),
}

impl SdkError {
    /// The underlying resolution error, if any
    pub fn as_resolve_error(&self) -> Option<&waypoint_runtime::ResolveError> {
        match self {
            SdkError::ResolveError(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
