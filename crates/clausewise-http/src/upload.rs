//! Upload filename handling.

use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("valid regex"));

const FALLBACK_FILENAME: &str = "unknown_file";

/// Reduce a client supplied filename to a safe single path component.
///
/// Path separators become spaces, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading or trailing `.`/`_` are
/// stripped.
pub fn secure_filename(filename: &str) -> String {
    let flattened = filename.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lowercase extension after the last dot, if any.
pub fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Contract.pdf"), "My_Contract.pdf");
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("c:\\docs\\nda (v2).docx"), "c_docs_nda_v2.docx");
        assert_eq!(secure_filename("..."), "unknown_file");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("a.B.TXT").as_deref(), Some("txt"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension("trailing."), None);
    }
}
