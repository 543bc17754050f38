//! Inference backend capabilities.
//!
//! The pipeline never talks to a model directly. Each stage holds an
//! `Arc<dyn ...>` of one of these traits, injected at construction, and
//! recovers from any [`ModelError`] with its deterministic fallback.

use crate::error::ModelResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Labels and scores returned by a zero-shot classifier, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroShotOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

impl ZeroShotOutput {
    /// Highest scoring label, if any.
    pub fn top(&self) -> Option<(&str, f64)> {
        self.labels
            .iter()
            .zip(self.scores.iter())
            .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })
            .map(|(label, score)| (label.as_str(), *score))
    }
}

/// A sentiment label with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentOutput {
    pub label: String,
    pub score: f64,
}

/// Zero-shot text classification.
#[async_trait]
pub trait ZeroShotModel: Send + Sync {
    /// Score `text` against `candidate_labels` using `hypothesis_template`.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        hypothesis_template: &str,
    ) -> ModelResult<ZeroShotOutput>;

    /// Backend name used in logs.
    fn name(&self) -> &str;
}

/// Abstractive summarization.
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    async fn summarize(&self, text: &str, max_length: usize, min_length: usize)
    -> ModelResult<String>;

    fn name(&self) -> &str;
}

/// Sentence-level sentiment.
#[async_trait]
pub trait SentimentModel: Send + Sync {
    async fn sentiment(&self, text: &str) -> ModelResult<SentimentOutput>;

    fn name(&self) -> &str;
}
