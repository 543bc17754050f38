//! Clause segmentation.
//!
//! Three strategies are tried in order and the first one that yields any
//! segment wins:
//!
//! 1. split on clause boundaries (numbered headers, ALL-CAPS header lines,
//!    `Article|Section|Clause N` markers, clause-type keywords),
//! 2. split into sentences,
//! 3. split into blank-line separated paragraphs.

use crate::error::{KnowledgeError, KnowledgeResult};
use crate::knowledge::KnowledgeBase;
use crate::text::char_len;
use regex::Regex;
use tracing::debug;

const MIN_BOUNDARY_SEGMENT_CHARS: usize = 20;
const MIN_SENTENCE_CHARS: usize = 50;
const MIN_PARAGRAPH_CHARS: usize = 30;

/// Splits contract text into candidate clause segments.
#[derive(Debug, Clone)]
pub struct Segmenter {
    boundaries: Regex,
    sentences: Regex,
}

impl Segmenter {
    /// Build a segmenter whose keyword boundaries are the knowledge base's
    /// clause labels.
    pub fn new(knowledge: &KnowledgeBase) -> KnowledgeResult<Self> {
        let keywords = knowledge
            .clause_labels()
            .into_iter()
            .map(|label| regex::escape(&label.to_lowercase()))
            .collect::<Vec<_>>()
            .join("|");

        // Numbered headers and ALL-CAPS lines are case-sensitive; markers and
        // keywords are not.
        let pattern = format!(
            r"\b\d+\.\s*[A-Z][^.]*\.|(?m:^[A-Z][A-Z\s]+$)|(?i:\b(?:article|section|clause)\s+\d+)|(?i:\b(?:{keywords})\b)"
        );

        Ok(Self {
            boundaries: compile("segment boundaries", &pattern)?,
            sentences: compile("sentence splitter", r"[.!?]+")?,
        })
    }

    /// Segment `text`. Returned segments are trimmed.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let by_boundary = split_keep_longer(&self.boundaries, text, MIN_BOUNDARY_SEGMENT_CHARS);
        if !by_boundary.is_empty() {
            debug!(segments = by_boundary.len(), strategy = "boundary", "Segmented text");
            return by_boundary;
        }

        let by_sentence = split_keep_longer(&self.sentences, text, MIN_SENTENCE_CHARS);
        if !by_sentence.is_empty() {
            debug!(segments = by_sentence.len(), strategy = "sentence", "Segmented text");
            return by_sentence;
        }

        let by_paragraph: Vec<String> = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| char_len(p) > MIN_PARAGRAPH_CHARS)
            .map(str::to_string)
            .collect();
        debug!(segments = by_paragraph.len(), strategy = "paragraph", "Segmented text");
        by_paragraph
    }
}

fn split_keep_longer(splitter: &Regex, text: &str, min_chars: usize) -> Vec<String> {
    splitter
        .split(text)
        .map(str::trim)
        .filter(|s| char_len(s) > min_chars)
        .map(str::to_string)
        .collect()
}

fn compile(owner: &str, pattern: &str) -> KnowledgeResult<Regex> {
    Regex::new(pattern).map_err(|e| KnowledgeError::InvalidPattern {
        owner: owner.to_string(),
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> Segmenter {
        Segmenter::new(&KnowledgeBase::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_numbered_headers_split_clauses() {
        let text = "1. Definitions. The parties agree to the terms set out below in full. \
                    2. Obligations. The supplier delivers goods within thirty days of order.";
        let segments = segmenter().segment(text);
        assert_eq!(segments.len(), 2);
        assert!(segments[0].starts_with("The parties agree"));
        assert!(segments[1].starts_with("The supplier delivers"));
    }

    #[test]
    fn test_all_caps_header_lines_split() {
        let text = "DELIVERY SCHEDULE\n\
                    The supplier ships every order within ten business days.\n\
                    WARRANTY\n\
                    Goods are free from defects for one year after delivery.";
        assert_eq!(
            segmenter().segment(text),
            vec![
                "The supplier ships every order within ten business days.",
                "Goods are free from defects for one year after delivery.",
            ]
        );
    }

    #[test]
    fn test_section_markers_split() {
        let text = "Section 1 The supplier ships every order within ten business days. \
                    ARTICLE 2 Goods are free from defects for one year after delivery. \
                    clause 3 Either side may end the arrangement with ninety days notice.";
        assert_eq!(
            segmenter().segment(text),
            vec![
                "The supplier ships every order within ten business days.",
                "Goods are free from defects for one year after delivery.",
                "Either side may end the arrangement with ninety days notice.",
            ]
        );
    }

    #[test]
    fn test_keywords_split_case_insensitively() {
        let text = "PAYMENT is due within thirty days of each invoice date \
                    and termination requires ninety days written notice to the other party";
        let segments = segmenter().segment(text);
        assert!(segments.len() >= 2);
        assert!(segments.iter().all(|s| char_len(s) > MIN_BOUNDARY_SEGMENT_CHARS));
        assert!(segments.iter().all(|s| !s.to_lowercase().starts_with("payment")));
    }

    #[test]
    fn test_unsplit_text_is_one_segment() {
        let text = "The supplier shall deliver goods to the buyer within thirty calendar days.";
        assert_eq!(segmenter().segment(text), vec![text]);
    }

    #[test]
    fn test_falls_back_to_sentences() {
        // Keyword boundaries leave only short fragments.
        let text = "Payment and termination and liability and payment and notices and waiver.";
        let segments = segmenter().segment(text);
        assert_eq!(
            segments,
            vec!["Payment and termination and liability and payment and notices and waiver"]
        );
    }

    #[test]
    fn test_falls_back_to_paragraphs() {
        let text = "Payment and termination. Liability and waiver.\n\nx";
        let segments = segmenter().segment(text);
        assert_eq!(segments, vec!["Payment and termination. Liability and waiver."]);
    }

    #[test]
    fn test_short_text_yields_nothing() {
        assert!(segmenter().segment("Short.").is_empty());
        assert!(segmenter().segment("").is_empty());
    }

    #[test]
    fn test_lengths_count_characters() {
        // 21 two-byte characters: longer than 20 chars.
        let text = "é".repeat(21);
        let segments = segmenter().segment(&text);
        assert_eq!(segments, vec![text]);
    }
}
