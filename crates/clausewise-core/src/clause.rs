//! Clause types and records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Contract clause category.
///
/// Serialized with its human label (`"Governing Law"`), which is also the
/// label offered to zero-shot classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClauseType {
    Termination,
    Confidentiality,
    Liability,
    Indemnification,
    Payment,
    #[serde(rename = "Governing Law")]
    GoverningLaw,
    #[serde(rename = "Dispute Resolution")]
    DisputeResolution,
    #[serde(rename = "Force Majeure")]
    ForceMajeure,
    Assignment,
    Amendments,
    Notices,
    Severability,
    #[serde(rename = "Entire Agreement")]
    EntireAgreement,
    Waiver,
    Survival,
    Other,
}

impl ClauseType {
    /// The fifteen classifiable categories, excluding `Other`.
    pub const CATEGORIES: [ClauseType; 15] = [
        ClauseType::Termination,
        ClauseType::Confidentiality,
        ClauseType::Liability,
        ClauseType::Indemnification,
        ClauseType::Payment,
        ClauseType::GoverningLaw,
        ClauseType::DisputeResolution,
        ClauseType::ForceMajeure,
        ClauseType::Assignment,
        ClauseType::Amendments,
        ClauseType::Notices,
        ClauseType::Severability,
        ClauseType::EntireAgreement,
        ClauseType::Waiver,
        ClauseType::Survival,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClauseType::Termination => "Termination",
            ClauseType::Confidentiality => "Confidentiality",
            ClauseType::Liability => "Liability",
            ClauseType::Indemnification => "Indemnification",
            ClauseType::Payment => "Payment",
            ClauseType::GoverningLaw => "Governing Law",
            ClauseType::DisputeResolution => "Dispute Resolution",
            ClauseType::ForceMajeure => "Force Majeure",
            ClauseType::Assignment => "Assignment",
            ClauseType::Amendments => "Amendments",
            ClauseType::Notices => "Notices",
            ClauseType::Severability => "Severability",
            ClauseType::EntireAgreement => "Entire Agreement",
            ClauseType::Waiver => "Waiver",
            ClauseType::Survival => "Survival",
            ClauseType::Other => "Other",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::CATEGORIES
            .iter()
            .chain(std::iter::once(&ClauseType::Other))
            .copied()
            .find(|ty| ty.label().eq_ignore_ascii_case(label))
    }

    /// Labels of the classifiable categories, in table order.
    pub fn candidate_labels() -> Vec<&'static str> {
        Self::CATEGORIES.iter().map(ClauseType::label).collect()
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClauseType {
    type Err = crate::error::KnowledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| crate::error::KnowledgeError::UnknownClauseType {
            label: s.to_string(),
        })
    }
}

/// A classified clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub confidence: f64,
}

impl Clause {
    pub fn new(clause_type: ClauseType, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            clause_type,
            text: text.into(),
            summary: None,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Aggregate figures over a clause list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseStatistics {
    pub total_clauses: usize,
    pub type_distribution: BTreeMap<String, usize>,
    pub average_clause_length: f64,
    pub most_common_type: Option<ClauseType>,
}

/// Count clauses per type and measure their average length in characters.
///
/// On a tie for the most common type, the type encountered first wins.
pub fn clause_statistics(clauses: &[Clause]) -> ClauseStatistics {
    let mut counts: Vec<(ClauseType, usize)> = Vec::new();
    let mut total_length = 0usize;

    for clause in clauses {
        total_length += clause.text.chars().count();
        match counts.iter_mut().find(|(ty, _)| *ty == clause.clause_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((clause.clause_type, 1)),
        }
    }

    let mut most_common: Option<(ClauseType, usize)> = None;
    for &(ty, count) in &counts {
        if most_common.is_none_or(|(_, best)| count > best) {
            most_common = Some((ty, count));
        }
    }

    let average_clause_length = if clauses.is_empty() {
        0.0
    } else {
        total_length as f64 / clauses.len() as f64
    };

    ClauseStatistics {
        total_clauses: clauses.len(),
        type_distribution: counts
            .iter()
            .map(|(ty, count)| (ty.label().to_string(), *count))
            .collect(),
        average_clause_length,
        most_common_type: most_common.map(|(ty, _)| ty),
    }
}
