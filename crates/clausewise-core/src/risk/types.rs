//! Risk records and their vocabulary.

use crate::clause::ClauseType;
use crate::text::truncate_chars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of leading characters of the evidence text used for deduplication.
pub const DEDUP_PREFIX_CHARS: usize = 100;

/// Risk category. Ten contract patterns plus the sentiment catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    AutoRenewal,
    PenaltyFees,
    UnlimitedLiability,
    DataOwnership,
    TerminationPenalties,
    ExclusiveTerms,
    UnilateralChanges,
    ConfidentialityBreach,
    JurisdictionIssues,
    ArbitrationRequirements,
    GeneralRisk,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::AutoRenewal => "auto_renewal",
            RiskCategory::PenaltyFees => "penalty_fees",
            RiskCategory::UnlimitedLiability => "unlimited_liability",
            RiskCategory::DataOwnership => "data_ownership",
            RiskCategory::TerminationPenalties => "termination_penalties",
            RiskCategory::ExclusiveTerms => "exclusive_terms",
            RiskCategory::UnilateralChanges => "unilateral_changes",
            RiskCategory::ConfidentialityBreach => "confidentiality_breach",
            RiskCategory::JurisdictionIssues => "jurisdiction_issues",
            RiskCategory::ArbitrationRequirements => "arbitration_requirements",
            RiskCategory::GeneralRisk => "general_risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk severity.
///
/// `Unknown` absorbs unrecognized values from external input and ranks last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Sort rank: high=3, medium=2, low=1, unknown=0.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Unknown => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected risk with its evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub category: RiskCategory,
    pub text: String,
    pub severity: Severity,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_type: Option<ClauseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

impl Risk {
    pub fn new(
        category: RiskCategory,
        text: impl Into<String>,
        severity: Severity,
        confidence: f64,
    ) -> Self {
        Self {
            category,
            text: text.into(),
            severity,
            confidence,
            clause_type: None,
            sentiment_score: None,
        }
    }

    pub fn with_clause_type(mut self, clause_type: ClauseType) -> Self {
        self.clause_type = Some(clause_type);
        self
    }

    pub fn with_sentiment_score(mut self, score: f64) -> Self {
        self.sentiment_score = Some(score);
        self
    }

    /// Deduplication key: category plus the first 100 characters of evidence.
    pub fn dedup_key(&self) -> (RiskCategory, &str) {
        (self.category, truncate_chars(&self.text, DEDUP_PREFIX_CHARS))
    }
}

/// Aggregate counts over a risk list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub total_risks: usize,
    pub high_risks: usize,
    pub medium_risks: usize,
    pub low_risks: usize,
    pub risk_categories: BTreeMap<RiskCategory, usize>,
    pub overall_risk_level: Severity,
}

impl Default for RiskSummary {
    fn default() -> Self {
        Self {
            total_risks: 0,
            high_risks: 0,
            medium_risks: 0,
            low_risks: 0,
            risk_categories: BTreeMap::new(),
            overall_risk_level: Severity::Low,
        }
    }
}
