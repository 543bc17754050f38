//! Pattern-based risk detection over the whole document.

use super::types::Risk;
use crate::knowledge::KnowledgeBase;
use crate::text::context_window;

/// Characters of context kept either side of the first match.
pub const CONTEXT_CHARS: usize = 100;

/// One risk per rule whose patterns match anywhere in `text`.
///
/// The evidence is the context around the earliest match of any of the
/// rule's patterns.
pub fn detect_rule_risks(knowledge: &KnowledgeBase, text: &str) -> Vec<Risk> {
    knowledge
        .risk_rules()
        .iter()
        .filter_map(|rule| {
            let first = rule
                .patterns
                .iter()
                .filter_map(|re| re.find(text))
                .min_by_key(|m| (m.start(), m.end()))?;

            Some(Risk::new(
                rule.category,
                context_window(text, first.start(), first.end(), CONTEXT_CHARS),
                knowledge.severity_for(rule.category),
                rule.confidence,
            ))
        })
        .collect()
}
