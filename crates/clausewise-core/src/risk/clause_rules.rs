//! Risks implied by a clause's type and wording.

use super::types::Risk;
use crate::clause::Clause;
use crate::knowledge::KnowledgeBase;
use crate::text::truncate_chars;

/// Clause evidence is cut to this many characters.
pub const CLAUSE_EVIDENCE_CHARS: usize = 200;

/// Apply every clause rule to every clause.
pub fn detect_clause_risks(knowledge: &KnowledgeBase, clauses: &[Clause]) -> Vec<Risk> {
    let mut risks = Vec::new();
    for clause in clauses {
        for rule in knowledge.clause_rules() {
            if rule.matches(clause.clause_type, &clause.text) {
                risks.push(
                    Risk::new(
                        rule.category,
                        truncate_chars(&clause.text, CLAUSE_EVIDENCE_CHARS),
                        knowledge.severity_for(rule.category),
                        rule.confidence,
                    )
                    .with_clause_type(clause.clause_type),
                );
            }
        }
    }
    risks
}
