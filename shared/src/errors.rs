//! Shared error types for the seat reclamation tooling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("File operation failed: {operation} on {path}: {source}")]
    FileError {
        operation: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SharedError {
    pub fn file(operation: &str, path: &std::path::Path, source: std::io::Error) -> Self {
        SharedError::FileError {
            operation: operation.to_string(),
            path: path.display().to_string(),
            source,
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
