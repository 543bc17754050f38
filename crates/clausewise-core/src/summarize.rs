//! Clause summarization.
//!
//! [`ModelSummarizer`] calls an abstractive model and falls back to
//! [`ExtractiveSummarizer`] when the model is missing, fails or returns
//! nothing usable. Inputs shorter than 50 characters are never summarized.

use crate::clause::Clause;
use crate::knowledge::KnowledgeBase;
use crate::model::SummarizationModel;
use crate::text::{
    capitalize_first, char_len, ensure_terminal_punctuation, normalize_whitespace,
    split_sentences, truncate_chars,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Trimmed inputs shorter than this are returned unchanged.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 50;
/// Default upper bound handed to the model.
pub const DEFAULT_MAX_LENGTH: usize = 150;
/// Lower bound handed to the model.
pub const DEFAULT_MIN_LENGTH: usize = 30;

const MAX_MODEL_INPUT_CHARS: usize = 1024;
const MIN_MODEL_INPUT_CHARS: usize = 100;
const EXTRACTIVE_BUDGET_CHARS: usize = 200;

/// Produces a summary for a piece of text. Never fails.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, max_length: Option<usize>) -> String;

    fn name(&self) -> &str;
}

fn is_too_short(text: &str) -> bool {
    char_len(text.trim()) < MIN_SUMMARY_INPUT_CHARS
}

/// Frequency-scored sentence selection.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    knowledge: Arc<KnowledgeBase>,
}

impl ExtractiveSummarizer {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Extractive summary of `text`, regardless of its length.
    pub fn summarize_text(&self, text: &str) -> String {
        let sentences = dedup_preserving_order(split_sentences(text));
        if sentences.is_empty() {
            return truncate_chars(text, EXTRACTIVE_BUDGET_CHARS).to_string();
        }

        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for word in words(text) {
            if !self.knowledge.is_stopword(&word) {
                *frequencies.entry(word).or_default() += 1;
            }
        }

        let mut scored: Vec<(&str, f64)> = sentences
            .iter()
            .map(|sentence| {
                let sentence_words = words(sentence);
                let score = if sentence_words.is_empty() {
                    0.0
                } else {
                    let total: usize = sentence_words
                        .iter()
                        .map(|w| frequencies.get(w).copied().unwrap_or(0))
                        .sum();
                    total as f64 / sentence_words.len() as f64
                };
                (*sentence, score)
            })
            .collect();
        // Stable: equal scores keep document order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut selected = Vec::new();
        let mut accumulated = 0usize;
        for (sentence, _) in scored {
            let length = char_len(sentence);
            if accumulated + length >= EXTRACTIVE_BUDGET_CHARS {
                break;
            }
            accumulated += length;
            selected.push(sentence);
        }

        if selected.is_empty() {
            selected.push(sentences[0]);
        }

        let summary = ensure_terminal_punctuation(selected.join(". "));
        capitalize_first(&summary)
    }
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    async fn summarize(&self, text: &str, _max_length: Option<usize>) -> String {
        if is_too_short(text) {
            return text.to_string();
        }
        self.summarize_text(text)
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

/// Model-backed summarizer with extractive fallback.
pub struct ModelSummarizer {
    model: Option<Arc<dyn SummarizationModel>>,
    fallback: ExtractiveSummarizer,
}

impl ModelSummarizer {
    pub fn new(model: Option<Arc<dyn SummarizationModel>>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            model,
            fallback: ExtractiveSummarizer::new(knowledge),
        }
    }
}

#[async_trait]
impl Summarizer for ModelSummarizer {
    async fn summarize(&self, text: &str, max_length: Option<usize>) -> String {
        if is_too_short(text) {
            return text.to_string();
        }

        let Some(model) = &self.model else {
            warn!("Summarization model unavailable, using extractive summary");
            return self.fallback.summarize_text(text);
        };

        let cleaned = preprocess(text);
        if char_len(&cleaned) < MIN_MODEL_INPUT_CHARS {
            return cleaned;
        }

        let max_length = max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        match model
            .summarize(&cleaned, max_length, DEFAULT_MIN_LENGTH)
            .await
        {
            Ok(summary) if !summary.trim().is_empty() => {
                debug!(model = model.name(), "Generated model summary");
                postprocess(&summary)
            }
            Ok(_) => {
                warn!(model = model.name(), "Model returned an empty summary, using extractive summary");
                self.fallback.summarize_text(text)
            }
            Err(e) => {
                warn!(
                    model = model.name(),
                    error = %e,
                    "Summarization failed, using extractive summary"
                );
                self.fallback.summarize_text(text)
            }
        }
    }

    fn name(&self) -> &str {
        "model"
    }
}

fn preprocess(text: &str) -> String {
    let normalized = normalize_whitespace(text)
        .replace('§', "Section ")
        .replace('¶', "Paragraph ");
    truncate_chars(&normalized, MAX_MODEL_INPUT_CHARS).to_string()
}

fn postprocess(summary: &str) -> String {
    let summary = ensure_terminal_punctuation(summary.trim().to_string());
    capitalize_first(&summary)
}

/// Lower-cased `\w+` tokens.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn dedup_preserving_order(sentences: Vec<&str>) -> Vec<&str> {
    let mut unique: Vec<&str> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        if !unique.contains(&sentence) {
            unique.push(sentence);
        }
    }
    unique
}

/// Attach a summary to every clause.
pub async fn summarize_clauses(summarizer: &dyn Summarizer, clauses: Vec<Clause>) -> Vec<Clause> {
    let mut summarized = Vec::with_capacity(clauses.len());
    for clause in clauses {
        let summary = summarizer.summarize(&clause.text, None).await;
        summarized.push(clause.with_summary(summary));
    }
    summarized
}

/// Size comparison between a text and its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub original_length: usize,
    pub summary_length: usize,
    pub original_words: usize,
    pub summary_words: usize,
    pub compression_ratio: f64,
    pub reduction_percentage: f64,
}

pub fn summary_statistics(original: &str, summary: &str) -> SummaryStatistics {
    let original_words = original.split_whitespace().count();
    let summary_words = summary.split_whitespace().count();
    let compression_ratio = if original_words > 0 {
        summary_words as f64 / original_words as f64
    } else {
        0.0
    };

    SummaryStatistics {
        original_length: char_len(original),
        summary_length: char_len(summary),
        original_words,
        summary_words,
        compression_ratio,
        reduction_percentage: (1.0 - compression_ratio) * 100.0,
    }
}
