//! # Clausewise Extract
//!
//! Plain-text extraction for contract documents. PDF goes through
//! `pdf-extract`, DOCX is read straight from its zip container, and text
//! files are decoded as UTF-8 with a Latin-1 fallback. All output is passed
//! through [`clean_text`].

pub mod clean;
pub mod docx;
pub mod extractor;
pub mod format;

pub use clean::clean_text;
pub use extractor::{DocumentInfo, TextExtractor};
pub use format::DocumentFormat;
