//! Prompts for contract enrichment

use clausewise_core::text::truncate_chars;
use clausewise_core::{Clause, Risk, Severity};
use serde_json::json;

/// System prompt shared by every call
pub const SYSTEM_PROMPT: &str = "You are a legal expert specializing in contract analysis. \
Provide clear, practical advice for business users.";

const INSIGHT_TEXT_CHARS: usize = 1000;
const INSIGHT_CLAUSE_CHARS: usize = 200;
const RISK_CONTEXT_CHARS: usize = 300;
const CLAUSE_TEXT_CHARS: usize = 500;
const COMPLIANCE_TEXT_CHARS: usize = 1500;

/// Build the overall legal insights prompt
pub fn build_insights_prompt(text: &str, clauses: &[Clause], risks: &[Risk]) -> String {
    let clause_digest: Vec<_> = clauses
        .iter()
        .map(|c| json!({ "type": c.clause_type, "text": truncate_chars(&c.text, INSIGHT_CLAUSE_CHARS) }))
        .collect();
    let risk_digest: Vec<_> = risks
        .iter()
        .map(|r| json!({ "category": r.category, "severity": r.severity }))
        .collect();

    format!(
        r#"As a legal expert, analyze this contract and provide key legal insights:

CONTRACT TEXT (first {INSIGHT_TEXT_CHARS} characters):
{}...

EXTRACTED CLAUSES:
{}

DETECTED RISKS:
{}

Please provide:
1. Key legal implications
2. Potential issues to watch for
3. Standard vs. unusual terms
4. Overall contract fairness assessment

Keep the response concise and practical for business users."#,
        truncate_chars(text, INSIGHT_TEXT_CHARS),
        to_pretty(&clause_digest),
        to_pretty(&risk_digest),
    )
}

/// Build the prompt explaining a single risk
pub fn build_risk_prompt(risk: &Risk) -> String {
    format!(
        r#"Explain this contract risk in simple terms for a business person:

RISK CATEGORY: {}
SEVERITY: {}
CONTEXT: {}...

Please explain:
1. What this risk means in business terms
2. Why it's concerning
3. What could happen if not addressed
4. How to mitigate or negotiate this risk

Keep it simple and actionable."#,
        risk.category,
        risk.severity,
        truncate_chars(&risk.text, RISK_CONTEXT_CHARS),
    )
}

/// Build the prompt interpreting a single clause
pub fn build_clause_prompt(clause: &Clause) -> String {
    format!(
        r#"Translate this legal clause into plain English for a business person:

CLAUSE TYPE: {}
LEGAL TEXT: {}...

Please provide:
1. What this clause means in simple terms
2. Key obligations or rights it creates
3. Important deadlines or conditions
4. What to watch out for

Make it easy for non-lawyers to understand."#,
        clause.clause_type,
        truncate_chars(&clause.text, CLAUSE_TEXT_CHARS),
    )
}

/// Build the recommendations prompt
pub fn build_recommendations_prompt(clauses: &[Clause], risks: &[Risk]) -> String {
    let count = |severity: Severity| risks.iter().filter(|r| r.severity == severity).count();
    let categories: Vec<&str> = risks.iter().map(|r| r.category.as_str()).collect();

    format!(
        r#"Based on this contract analysis, provide 5-7 actionable recommendations:

CLAUSES FOUND: {}
RISKS DETECTED: {}
HIGH RISKS: {}
MEDIUM RISKS: {}
RISK CATEGORIES: {:?}

Please provide specific, actionable recommendations for:
1. Negotiation priorities
2. Risk mitigation strategies
3. Legal review needs
4. Business considerations

Format as a numbered list of clear, actionable items."#,
        clauses.len(),
        risks.len(),
        count(Severity::High),
        count(Severity::Medium),
        categories,
    )
}

/// Build the compliance prompt
pub fn build_compliance_prompt(text: &str) -> String {
    format!(
        r#"Analyze this contract for potential compliance issues:

CONTRACT TEXT: {}...

Check for:
1. Data protection/privacy compliance (GDPR, CCPA, etc.)
2. Industry-specific regulations
3. Standard contract requirements
4. Missing essential clauses
5. Unusual or problematic terms

Provide a compliance assessment with specific concerns and recommendations."#,
        truncate_chars(text, COMPLIANCE_TEXT_CHARS),
    )
}

/// Build the negotiation points prompt
pub fn build_negotiation_prompt(clauses: &[Clause], risks: &[Risk]) -> String {
    let clause_types: Vec<&str> = clauses.iter().map(|c| c.clause_type.label()).collect();
    let notable: Vec<&str> = risks
        .iter()
        .filter(|r| matches!(r.severity, Severity::High | Severity::Medium))
        .map(|r| r.category.as_str())
        .collect();

    format!(
        r#"Based on this contract analysis, identify the most important negotiation points:

CLAUSES: {clause_types:?}
RISKS: {notable:?}

For each key area, provide:
1. What to negotiate
2. Why it's important
3. Suggested approach
4. Potential compromises

Start each key area on an unindented line and indent its details.
Focus on high-impact, negotiable items."#
    )
}

fn to_pretty(value: &[serde_json::Value]) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "[]".to_string())
}
