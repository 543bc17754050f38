//! Small text helpers shared by the pipeline stages.
//!
//! Lengths are measured in `char`s, never bytes, so multi-byte text is
//! never split inside a code point.

/// Number of characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of `s` holding at most `max_chars` characters.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Split on runs of `.`, `!` and `?`, trimming each piece and dropping empties.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Collapse every whitespace run into a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Up to `radius` characters either side of the byte range `start..end`.
///
/// A `...` marker is added on each side where the window was cut.
pub fn context_window(text: &str, start: usize, end: usize, radius: usize) -> String {
    let before = &text[..start];
    let after = &text[end..];

    let skip = char_len(before).saturating_sub(radius);
    let window_start = before
        .char_indices()
        .nth(skip)
        .map(|(idx, _)| idx)
        .unwrap_or(start);
    let window_end = end + truncate_chars(after, radius).len();

    let mut context = String::new();
    if window_start > 0 {
        context.push_str("...");
    }
    context.push_str(&text[window_start..window_end]);
    if window_end < text.len() {
        context.push_str("...");
    }
    context
}

/// Append a period unless the text already ends with `.`, `!` or `?`.
pub fn ensure_terminal_punctuation(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

/// Uppercase the first character.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
