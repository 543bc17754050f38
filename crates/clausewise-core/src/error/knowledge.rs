//! Knowledge table errors.

use thiserror::Error;

/// Errors raised while loading or compiling knowledge tables.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse knowledge tables: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pattern '{pattern}' for {owner}: {message}")]
    InvalidPattern {
        owner: String,
        pattern: String,
        message: String,
    },

    #[error("Unknown clause type '{label}'")]
    UnknownClauseType { label: String },

    #[error("Knowledge tables define no clause types")]
    NoClauseTypes,
}

/// Result type alias for knowledge loading.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
