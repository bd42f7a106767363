//! Error types for splashanno operations.

use thiserror::Error;

/// Errors that can occur while reading, shaping or writing the document.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Error reading file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid document structure: {0}")]
    Structure(String),

    #[error("Error writing file: {0}")]
    Write(#[source] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid {name} parameter: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for errors caused by the request rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StoreError::Validation(_) | StoreError::InvalidParameter { .. }
        )
    }
}

/// Result type alias for splashanno operations.
pub type StoreResult<T> = Result<T, StoreError>;
