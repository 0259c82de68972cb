//! Error types for the control plane
use thiserror::Error;

/// Control plane errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// HTTP server error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// External tempo feed request failure
    #[error("Tempo feed error: {0}")]
    TempoFeed(#[from] reqwest::Error),
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;
