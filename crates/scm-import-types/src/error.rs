//! Error types for the import workflow

use thiserror::Error;

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur during import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Repository type is not among the importable types
    #[error("Unknown repository type: {0}")]
    UnknownRepositoryType(String),

    /// Source kind string could not be parsed
    #[error("Unknown import source: {0}")]
    UnknownSource(String),

    /// Selected type cannot import from this source
    #[error("Repository type {repository_type} does not support importing from {source_kind}")]
    UnsupportedSource {
        repository_type: String,
        source_kind: String,
    },

    /// A required source parameter is blank
    #[error("Missing source parameter: {0}")]
    MissingParameter(String),

    /// Operation is not allowed on the current wizard step
    #[error("Invalid step: {0}")]
    InvalidStep(String),

    /// The backend could not be reached or rejected the request
    #[error("{title}: {message}")]
    Backend { title: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
