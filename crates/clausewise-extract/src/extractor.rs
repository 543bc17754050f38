//! Format dispatch.

use crate::clean::clean_text;
use crate::docx::read_docx;
use crate::format::DocumentFormat;
use clausewise_core::{DocumentError, DocumentResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Turns supported document files into cleaned plain text.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract and clean the text of `path`.
    pub fn extract_text(&self, path: impl AsRef<Path>) -> DocumentResult<String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DocumentError::not_found(path));
        }

        let format = DocumentFormat::from_path(path)?;
        debug!(path = %path.display(), format = %format, "Extracting document text");

        let text = match format {
            DocumentFormat::Pdf => self.extract_pdf(path)?,
            DocumentFormat::Docx => {
                let raw = read_docx(path)
                    .map_err(|message| DocumentError::extraction_failed(path, message))?;
                clean_text(&raw)
            }
            DocumentFormat::Doc => {
                return Err(DocumentError::NotImplemented {
                    format: "DOC".to_string(),
                });
            }
            DocumentFormat::Txt => clean_text(&read_text_lossy(path)?),
        };

        info!(
            path = %path.display(),
            format = %format,
            chars = text.chars().count(),
            "Extracted document text"
        );
        Ok(text)
    }

    fn extract_pdf(&self, path: &Path) -> DocumentResult<String> {
        let raw = pdf_extract::extract_text(path)
            .map_err(|e| DocumentError::extraction_failed(path, e.to_string()))?;
        let cleaned = clean_text(&raw);
        debug!(
            raw_chars = raw.chars().count(),
            cleaned_chars = cleaned.chars().count(),
            "PDF text cleaned"
        );

        if cleaned.is_empty() {
            warn!(path = %path.display(), "PDF extraction produced no text");
            return Err(DocumentError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(cleaned)
    }

    /// Size and shape figures for a document.
    pub fn document_info(&self, path: impl AsRef<Path>) -> DocumentResult<DocumentInfo> {
        let path = path.as_ref();
        let text = self.extract_text(path)?;
        let file_size = std::fs::metadata(path)?.len();

        Ok(DocumentInfo {
            filename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_size,
            text_length: text.chars().count(),
            word_count: text.split_whitespace().count(),
            line_count: text.split('\n').count(),
        })
    }
}

/// UTF-8, falling back to Latin-1 where every byte maps to one code point.
fn read_text_lossy(path: &Path) -> DocumentResult<String> {
    let bytes = std::fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(path = %path.display(), "File is not UTF-8, decoding as Latin-1");
            Ok(e.into_bytes().iter().map(|&b| char::from(b)).collect())
        }
    }
}

/// Basic document figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub file_size: u64,
    pub text_length: usize,
    pub word_count: usize,
    pub line_count: usize,
}
