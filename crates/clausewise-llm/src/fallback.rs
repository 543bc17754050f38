//! Deterministic content used when the LLM is unavailable.
//!
//! Besides the full static analysis, this module holds the rule-based
//! helpers that enrich every analysis regardless of the backend: mitigation
//! suggestions, clause key points, business impact and the compliance
//! heuristics.

use crate::analysis::{
    ClauseInterpretation, ComplianceCheck, LlmAnalysis, NegotiationPoint, RiskExplanation,
};
use clausewise_core::{Clause, ClauseType, Risk, RiskCategory};

pub const FALLBACK_INSIGHTS: &str =
    "LLM analysis not available. Please consult with a legal professional for detailed insights.";
pub const FALLBACK_ASSESSMENT: &str = "Compliance review requires legal expertise";
pub const FALLBACK_COMPLIANCE_SCORE: f64 = 0.5;

const FALLBACK_RECOMMENDATIONS: [&str; 5] = [
    "Have the contract reviewed by legal counsel",
    "Identify and prioritize key risks",
    "Consider industry best practices",
    "Negotiate unfavorable terms",
    "Ensure compliance with applicable laws",
];

const KEY_POINT_KEYWORDS: [&str; 7] = [
    "shall",
    "must",
    "will",
    "agree",
    "obligation",
    "liability",
    "terminate",
];
const MAX_KEY_POINTS: usize = 3;

const COMPLIANCE_TERMS: [&str; 5] = [
    "governing law",
    "jurisdiction",
    "dispute resolution",
    "confidentiality",
    "termination",
];

const COMMON_CLAUSES: [(&str, &str); 6] = [
    ("governing law", "Governing Law"),
    ("dispute resolution", "Dispute Resolution"),
    ("confidentiality", "Confidentiality"),
    ("termination", "Termination"),
    ("force majeure", "Force Majeure"),
    ("entire agreement", "Entire Agreement"),
];

/// Message returned in place of a failed call's text.
pub fn unavailable(task: &str) -> String {
    format!("Analysis unavailable for {task}. Please consult with a legal professional.")
}

pub fn fallback_recommendations() -> Vec<String> {
    FALLBACK_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect()
}

pub fn fallback_negotiation_points() -> Vec<NegotiationPoint> {
    vec![NegotiationPoint {
        topic: "Legal Review".to_string(),
        details: "Have the entire contract reviewed by qualified legal counsel.".to_string(),
    }]
}

/// Mitigation strategies for a risk category.
pub fn mitigation_suggestions(category: RiskCategory) -> Vec<String> {
    let suggestions: [&str; 3] = match category {
        RiskCategory::AutoRenewal => [
            "Add explicit termination notice requirements",
            "Include opt-out mechanisms",
            "Set clear renewal terms",
        ],
        RiskCategory::PenaltyFees => [
            "Negotiate reasonable penalty caps",
            "Add grace periods",
            "Include dispute resolution procedures",
        ],
        RiskCategory::UnlimitedLiability => [
            "Add liability caps",
            "Include insurance requirements",
            "Negotiate mutual limitation of liability",
        ],
        RiskCategory::DataOwnership => [
            "Clarify data ownership terms",
            "Add data protection clauses",
            "Include data return provisions",
        ],
        _ => [
            "Consult with legal counsel",
            "Review industry standards",
            "Consider alternative terms",
        ],
    };
    suggestions.iter().map(|s| s.to_string()).collect()
}

/// Up to three obligation keywords found in the clause.
pub fn key_points(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    KEY_POINT_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .take(MAX_KEY_POINTS)
        .map(|keyword| format!("Contains '{keyword}' obligations"))
        .collect()
}

pub fn business_impact(clause_type: ClauseType) -> &'static str {
    match clause_type {
        ClauseType::Payment => "Financial impact",
        ClauseType::Termination => "Operational risk",
        ClauseType::Liability => "Legal exposure",
        ClauseType::Confidentiality => "Information security",
        ClauseType::Indemnification => "Financial protection",
        _ => "Requires legal review",
    }
}

/// 0.2 for every standard protective term present, capped at 1.0.
pub fn compliance_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let present = COMPLIANCE_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .count();
    (present as f64 * 0.2).min(1.0)
}

/// Common clauses whose names never appear in the text.
pub fn missing_clauses(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    COMMON_CLAUSES
        .iter()
        .filter(|(needle, _)| !lowered.contains(needle))
        .map(|(_, title)| title.to_string())
        .collect()
}

pub fn regulatory_concerns(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut concerns = Vec::new();
    if lowered.contains("data") && !lowered.contains("privacy") {
        concerns.push("Data handling without privacy provisions".to_string());
    }
    if lowered.contains("personal information") && !lowered.contains("gdpr") {
        concerns.push("Personal data without GDPR compliance".to_string());
    }
    concerns
}

/// Complete analysis built without any LLM call.
pub fn fallback_analysis(clauses: &[Clause], risks: &[Risk]) -> LlmAnalysis {
    LlmAnalysis {
        legal_insights: FALLBACK_INSIGHTS.to_string(),
        risk_explanations: risks
            .iter()
            .map(|risk| RiskExplanation {
                risk_id: risk.category,
                explanation: format!(
                    "This is a {} risk related to {}. Please review with legal counsel.",
                    risk.severity, risk.category
                ),
                severity: risk.severity,
                mitigation_suggestions: vec![
                    "Consult with legal counsel".to_string(),
                    "Review industry standards".to_string(),
                    "Consider negotiation".to_string(),
                ],
            })
            .collect(),
        clause_interpretations: clauses
            .iter()
            .map(|clause| ClauseInterpretation {
                clause_type: clause.clause_type,
                interpretation: format!(
                    "This is a {} clause. Please have it reviewed by legal counsel.",
                    clause.clause_type
                ),
                key_points: vec!["Legal review recommended".to_string()],
                business_impact: "Requires legal assessment".to_string(),
            })
            .collect(),
        recommendations: fallback_recommendations(),
        compliance_check: ComplianceCheck {
            assessment: FALLBACK_ASSESSMENT.to_string(),
            compliance_score: FALLBACK_COMPLIANCE_SCORE,
            missing_clauses: Vec::new(),
            regulatory_concerns: Vec::new(),
        },
        negotiation_points: fallback_negotiation_points(),
    }
}
