//! Error types for blobfs

use thiserror::Error;

/// Result type alias for driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in driver operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The required configuration setting \"{0}\" was not set")]
    Configuration(String),

    #[error("Backend service error: {0}")]
    Backend(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}
