//! DOCX paragraph text.
//!
//! A DOCX file is a zip archive; the body lives in `word/document.xml`.
//! Text runs (`w:t`) are concatenated and every paragraph (`w:p`) ends with
//! a newline.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the paragraph text of a DOCX file.
pub fn read_docx(path: &Path) -> Result<String, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| e.to_string())?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| e.to_string())?;
    paragraphs_from_xml(&xml)
}

/// Extract paragraph text from WordprocessingML.
pub fn paragraphs_from_xml(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_run_text => {
                let chunk = std::str::from_utf8(&e).map_err(|e| e.to_string())?;
                text.push_str(chunk);
            }
            Event::GeneralRef(e) if in_run_text => {
                let name = std::str::from_utf8(&e).map_err(|e| e.to_string())?;
                if let Some(resolved) = resolve_entity(name) {
                    text.push(resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
