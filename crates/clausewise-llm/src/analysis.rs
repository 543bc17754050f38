//! LLM analysis records.

use clausewise_core::{ClauseType, RiskCategory, Severity};
use serde::{Deserialize, Serialize};

/// Plain-language explanation of one detected risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskExplanation {
    pub risk_id: RiskCategory,
    pub explanation: String,
    pub severity: Severity,
    pub mitigation_suggestions: Vec<String>,
}

/// Plain-language reading of one clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseInterpretation {
    pub clause_type: ClauseType,
    pub interpretation: String,
    pub key_points: Vec<String>,
    pub business_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub assessment: String,
    pub compliance_score: f64,
    pub missing_clauses: Vec<String>,
    pub regulatory_concerns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationPoint {
    pub topic: String,
    pub details: String,
}

/// Narrative enrichment. Every field is always populated, from the LLM or
/// from deterministic templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmAnalysis {
    pub legal_insights: String,
    pub risk_explanations: Vec<RiskExplanation>,
    pub clause_interpretations: Vec<ClauseInterpretation>,
    pub recommendations: Vec<String>,
    pub compliance_check: ComplianceCheck,
    pub negotiation_points: Vec<NegotiationPoint>,
}
