//! Post-extraction text cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static PAGE_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Page \d+ of \d+").expect("valid regex"));
static PAGE_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+/\d+").expect("valid regex"));

/// Collapse whitespace, strip `Page N of M` and `N/M` page markers, trim.
///
/// Whitespace is collapsed first, so the result is a single line.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = WHITESPACE.replace_all(text, " ");
    let text = PAGE_OF.replace_all(&text, "");
    let text = PAGE_FRACTION.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_text("  a\n\n b\t\tc  "), "a b c");
    }

    #[test]
    fn test_removes_page_markers() {
        let text = "Terms apply.\nPage 2 of 10\nPayment is due. 3/10";
        assert_eq!(clean_text(text), "Terms apply.  Payment is due.");
    }

    #[test]
    fn test_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n "), "");
    }
}
