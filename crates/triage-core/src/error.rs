//! Centralized error types for Triage.

use thiserror::Error;

/// Main error type for Triage operations.
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Dimension mismatch: index holds {expected}-dimensional vectors, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Stream processing failed: {0}")]
    Stream(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Triage operations.
pub type TriageResult<T> = Result<T, TriageError>;

impl TriageError {
    /// Create an embedding error.
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create a stream processing error.
    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream(msg.into())
    }
}
