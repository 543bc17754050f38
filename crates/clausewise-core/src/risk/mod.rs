//! Risk detection.
//!
//! Three detectors feed one merged list:
//! - `rules`: regex rules over the whole document
//! - `clause_rules`: clause type plus keyword rules over classified clauses
//! - `sentiment`: negative obligation sentences, when a sentiment model is
//!   configured
//!
//! Their outputs are concatenated in that order, deduplicated on
//! `(category, first 100 chars)` and stably sorted by severity.

mod clause_rules;
mod ranking;
mod rules;
mod sentiment;
mod types;

pub use clause_rules::{CLAUSE_EVIDENCE_CHARS, detect_clause_risks};
pub use ranking::{deduplicate, merge_risks, risk_summary, sort_by_severity};
pub use rules::{CONTEXT_CHARS, detect_rule_risks};
pub use sentiment::detect_sentiment_risks;
pub use types::{DEDUP_PREFIX_CHARS, Risk, RiskCategory, RiskSummary, Severity};

use crate::clause::Clause;
use crate::knowledge::KnowledgeBase;
use crate::model::SentimentModel;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs every detector and merges their findings.
pub struct RiskDetector {
    knowledge: Arc<KnowledgeBase>,
    sentiment: Option<Arc<dyn SentimentModel>>,
}

impl RiskDetector {
    pub fn new(knowledge: Arc<KnowledgeBase>, sentiment: Option<Arc<dyn SentimentModel>>) -> Self {
        Self {
            knowledge,
            sentiment,
        }
    }

    pub async fn detect_risks(&self, text: &str, clauses: &[Clause]) -> Vec<Risk> {
        let rule_risks = detect_rule_risks(&self.knowledge, text);
        let clause_risks = detect_clause_risks(&self.knowledge, clauses);
        let sentiment_risks = match &self.sentiment {
            Some(model) => detect_sentiment_risks(&self.knowledge, model.as_ref(), text).await,
            None => Vec::new(),
        };

        debug!(
            rules = rule_risks.len(),
            clauses = clause_risks.len(),
            sentiment = sentiment_risks.len(),
            "Collected risk candidates"
        );

        let risks = merge_risks([rule_risks, clause_risks, sentiment_risks]);
        info!(risks = risks.len(), "Detected risks");
        risks
    }

    pub fn summary(&self, risks: &[Risk]) -> RiskSummary {
        risk_summary(risks)
    }
}
