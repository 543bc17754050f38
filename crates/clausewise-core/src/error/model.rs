//! Inference backend errors.
//!
//! A `ModelError` never reaches the caller of the pipeline: each stage
//! recovers with its rule-based or extractive fallback and logs a warning.

use thiserror::Error;

/// Errors returned by zero-shot, summarization and sentiment backends.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No backend is configured for this stage.
    #[error("Model backend unavailable")]
    Unavailable,

    /// The request to the backend failed.
    #[error("Model '{backend}' request failed: {message}")]
    Request { backend: String, message: String },

    /// The backend answered with something we cannot interpret.
    #[error("Model '{backend}' returned a malformed response: {message}")]
    Malformed { backend: String, message: String },
}

impl ModelError {
    /// Create a Request error.
    pub fn request(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Create a Malformed error.
    pub fn malformed(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Name of the backend that failed, if any.
    pub fn backend(&self) -> Option<&str> {
        match self {
            Self::Request { backend, .. } | Self::Malformed { backend, .. } => Some(backend),
            Self::Unavailable => None,
        }
    }
}

/// Result type alias for model calls.
pub type ModelResult<T> = Result<T, ModelError>;
