//! Demoter-specific error types

use shared::{ApiFailure, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoterError {
    #[error("Configuration error: {field}: {message}")]
    ConfigurationError { field: String, message: String },

    #[error("Input file not found: {path}")]
    MissingInput { path: String },

    #[error("Stored data at {path} is unreadable: {message}")]
    CorruptStore { path: String, message: String },

    #[error("Candidate {email} has no entitlement id and cannot be demoted")]
    MissingEntitlement { email: String },

    #[error("Demotion of entitlement {entitlement_id} failed: {reason}")]
    DemotionFailed { entitlement_id: String, reason: ApiFailure },

    #[error("Batch demotion is locked: {candidates} candidates left untouched")]
    BatchModeLocked { candidates: usize },

    #[error("HTTP client setup failed: {message}")]
    HttpClientError { message: String },

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DemoterError {
    pub fn config(field: &str, message: impl Into<String>) -> Self {
        DemoterError::ConfigurationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type DemoterResult<T> = Result<T, DemoterError>;
