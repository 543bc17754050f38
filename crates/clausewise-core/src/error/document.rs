//! Input document errors.
//!
//! These errors fail the whole analysis: the document is missing, in a
//! format we cannot read, or contains too little text to analyze.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning an input file into analyzable text.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The file extension is not one of the supported formats.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// The format is recognized but extraction is not implemented.
    #[error("{format} file extraction not implemented. Please convert to DOCX or PDF.")]
    NotImplemented { format: String },

    /// The backend failed to extract text from the file.
    #[error("Failed to extract text from {}: {message}", path.display())]
    ExtractionFailed { path: PathBuf, message: String },

    /// Extraction produced no text at all.
    #[error("No text could be extracted from {}", path.display())]
    Empty { path: PathBuf },

    /// Extracted text is shorter than the analysis minimum.
    #[error("Document appears to be empty or too short ({length} characters, minimum {minimum})")]
    TooShort { length: usize, minimum: usize },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Create a FileNotFound error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an ExtractionFailed error.
    pub fn extraction_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than the host.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::ExtractionFailed { .. })
    }
}

/// Result type alias for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
