//! Extraction tests against real files on disk.

use clausewise_core::DocumentError;
use clausewise_extract::TextExtractor;
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn write_docx(dir: &TempDir, name: &str, paragraphs: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
    path
}

#[test]
fn test_txt_is_cleaned() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "contract.txt",
        b"1. Term.\n\nThis agreement runs for one year.\nPage 1 of 3\n",
    );

    let text = TextExtractor::new().extract_text(&path).unwrap();
    assert_eq!(text, "1. Term. This agreement runs for one year.");
}

#[test]
fn test_txt_latin1_fallback() {
    let dir = TempDir::new().unwrap();
    // "café" in Latin-1
    let path = write_file(&dir, "latin.txt", b"caf\xe9 terms");

    let text = TextExtractor::new().extract_text(&path).unwrap();
    assert_eq!(text, "café terms");
}

#[test]
fn test_docx_paragraphs() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(
        &dir,
        "contract.docx",
        &["1. Payment.", "Invoices are due within 30 days."],
    );

    let text = TextExtractor::new().extract_text(&path).unwrap();
    assert_eq!(text, "1. Payment. Invoices are due within 30 days.");
}

#[test]
fn test_docx_without_body_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("other.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"<x/>").unwrap();
    zip.finish().unwrap();

    let err = TextExtractor::new().extract_text(&path).unwrap_err();
    assert!(matches!(err, DocumentError::ExtractionFailed { .. }));
    assert!(!err.is_client_error());
}

#[test]
fn test_missing_file() {
    let err = TextExtractor::new()
        .extract_text("/definitely/not/here.pdf")
        .unwrap_err();
    assert!(matches!(err, DocumentError::FileNotFound { .. }));
}

#[test]
fn test_doc_is_not_implemented() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "legacy.doc", b"binary");

    let err = TextExtractor::new().extract_text(&path).unwrap_err();
    assert!(matches!(err, DocumentError::NotImplemented { .. }));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.rtf", b"{\\rtf1}");

    let err = TextExtractor::new().extract_text(&path).unwrap_err();
    assert!(matches!(err, DocumentError::UnsupportedFormat { .. }));
}

#[test]
fn test_invalid_pdf_fails_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "fake.pdf", b"not a pdf at all");

    let err = TextExtractor::new().extract_text(&path).unwrap_err();
    assert!(matches!(err, DocumentError::ExtractionFailed { .. }));
}

#[test]
fn test_document_info() {
    let dir = TempDir::new().unwrap();
    let contents = b"Either party may terminate this agreement.";
    let path = write_file(&dir, "info.txt", contents);

    let info = TextExtractor::new().document_info(&path).unwrap();
    assert_eq!(info.filename, "info.txt");
    assert_eq!(info.file_size, contents.len() as u64);
    assert_eq!(info.text_length, contents.len());
    assert_eq!(info.word_count, 6);
    assert_eq!(info.line_count, 1);
}
