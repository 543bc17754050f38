//! Umbrella error type and conversions.
//!
//! `ClausewiseError` lets callers propagate any core failure with `?`.

use super::document::DocumentError;
use super::knowledge::KnowledgeError;
use super::model::ModelError;
use thiserror::Error;

/// Main error type for Clausewise operations.
#[derive(Debug, Error)]
pub enum ClausewiseError {
    /// Input document errors.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Knowledge table errors.
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// Model errors that escaped a stage (construction only).
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Result type alias for Clausewise operations.
pub type ClausewiseResult<T> = Result<T, ClausewiseError>;
