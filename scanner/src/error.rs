//! Scanner error types

use shared::{ApiFailure, SharedError};
use thiserror::Error;

/// Result type for scanner operations
pub type ScannerResult<T> = Result<T, ScannerError>;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Configuration error: {field}: {message}")]
    ConfigurationError { field: String, message: String },

    #[error("Request for {operation} failed: {reason}")]
    RemoteError { operation: String, reason: ApiFailure },

    #[error("HTTP client setup failed: {message}")]
    HttpClientError { message: String },

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ScannerError {
    pub fn remote(operation: &str, reason: ApiFailure) -> Self {
        ScannerError::RemoteError {
            operation: operation.to_string(),
            reason,
        }
    }
}
