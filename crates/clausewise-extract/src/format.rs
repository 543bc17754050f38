//! Supported input formats.

use clausewise_core::DocumentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Document formats recognized by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    /// Legacy Word. Recognized, but extraction is not implemented.
    Doc,
    Txt,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Doc,
        DocumentFormat::Txt,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Txt => "txt",
        }
    }

    /// Parse an extension, with or without the leading dot, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        Self::from_extension(extension).ok_or_else(|| DocumentError::UnsupportedFormat {
            extension: format!(".{}", extension.to_lowercase()),
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
