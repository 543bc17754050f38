//! Clause classification.
//!
//! Two [`Classifier`] implementations are available. [`RuleBasedClassifier`]
//! scores every clause type by counting keyword pattern matches and is fully
//! deterministic. [`ModelClassifier`] asks a zero-shot model first and falls
//! back to its inner rule-based classifier whenever the model is missing,
//! fails, or answers with a label outside the taxonomy.

use crate::clause::{Clause, ClauseType};
use crate::error::KnowledgeResult;
use crate::knowledge::KnowledgeBase;
use crate::model::ZeroShotModel;
use crate::segment::Segmenter;
use crate::text::{char_len, truncate_chars};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    Model,
    Rules,
}

/// A clause type with the confidence it was assigned with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub clause_type: ClauseType,
    pub confidence: f64,
    pub source: ClassificationSource,
}

/// Assigns a clause type to a text segment. Never fails.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Classification;

    /// Classifier name used in logs.
    fn name(&self) -> &str;
}

/// Keyword-count classifier.
#[derive(Debug, Clone)]
pub struct RuleBasedClassifier {
    knowledge: Arc<KnowledgeBase>,
}

impl RuleBasedClassifier {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Match count per clause type, in table order.
    pub fn scores(&self, text: &str) -> Vec<(ClauseType, usize)> {
        self.knowledge
            .clause_patterns()
            .iter()
            .map(|entry| {
                let count = entry
                    .patterns
                    .iter()
                    .map(|re| re.find_iter(text).count())
                    .sum();
                (entry.clause_type, count)
            })
            .collect()
    }

    /// Highest scoring type; the earliest table entry wins ties and an
    /// all-zero score is `Other`.
    pub fn classify_text(&self, text: &str) -> Classification {
        let mut best = (ClauseType::Other, 0usize);
        for (clause_type, score) in self.scores(text) {
            if score > best.1 {
                best = (clause_type, score);
            }
        }

        Classification {
            clause_type: best.0,
            confidence: self.knowledge.classification().rule_confidence,
            source: ClassificationSource::Rules,
        }
    }
}

#[async_trait]
impl Classifier for RuleBasedClassifier {
    async fn classify(&self, text: &str) -> Classification {
        self.classify_text(text)
    }

    fn name(&self) -> &str {
        "rules"
    }
}

/// Zero-shot classifier with a rule-based fallback.
pub struct ModelClassifier {
    model: Option<Arc<dyn ZeroShotModel>>,
    fallback: RuleBasedClassifier,
    knowledge: Arc<KnowledgeBase>,
}

impl ModelClassifier {
    /// `model = None` behaves like the fallback, logging each fallback.
    pub fn new(model: Option<Arc<dyn ZeroShotModel>>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            model,
            fallback: RuleBasedClassifier::new(Arc::clone(&knowledge)),
            knowledge,
        }
    }
}

#[async_trait]
impl Classifier for ModelClassifier {
    async fn classify(&self, text: &str) -> Classification {
        let Some(model) = &self.model else {
            warn!("Zero-shot model unavailable, using rule-based classification");
            return self.fallback.classify_text(text);
        };

        let settings = self.knowledge.classification();
        let input = truncate_chars(text, settings.max_model_input_chars);
        let labels = self.knowledge.clause_labels();

        match model
            .classify(input, &labels, &settings.hypothesis_template)
            .await
        {
            Ok(output) => match output
                .top()
                .and_then(|(label, score)| ClauseType::from_label(label).map(|ty| (ty, score)))
            {
                Some((clause_type, score)) => Classification {
                    clause_type,
                    confidence: score.clamp(0.0, 1.0),
                    source: ClassificationSource::Model,
                },
                None => {
                    warn!(
                        model = model.name(),
                        labels = ?output.labels,
                        "Zero-shot model returned no usable label, using rule-based classification"
                    );
                    self.fallback.classify_text(text)
                }
            },
            Err(e) => {
                warn!(
                    model = model.name(),
                    error = %e,
                    "Zero-shot classification failed, using rule-based classification"
                );
                self.fallback.classify_text(text)
            }
        }
    }

    fn name(&self) -> &str {
        "zero-shot"
    }
}

/// Segments a document and classifies the resulting clauses.
pub struct ClauseExtractor {
    segmenter: Segmenter,
    classifier: Arc<dyn Classifier>,
    min_clause_chars: usize,
}

impl ClauseExtractor {
    pub fn new(
        knowledge: &KnowledgeBase,
        classifier: Arc<dyn Classifier>,
    ) -> KnowledgeResult<Self> {
        Ok(Self {
            segmenter: Segmenter::new(knowledge)?,
            classifier,
            min_clause_chars: knowledge.classification().min_clause_chars,
        })
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        self.segmenter.segment(text)
    }

    /// Classify every segment longer than the minimum clause length.
    pub async fn extract_clauses(&self, text: &str) -> Vec<Clause> {
        let segments = self.segmenter.segment(text);
        let mut clauses = Vec::with_capacity(segments.len());

        for segment in segments {
            if char_len(segment.trim()) <= self.min_clause_chars {
                continue;
            }
            let classification = self.classifier.classify(&segment).await;
            debug!(
                clause_type = %classification.clause_type,
                confidence = classification.confidence,
                source = ?classification.source,
                "Classified clause"
            );
            clauses.push(Clause::new(
                classification.clause_type,
                segment,
                classification.confidence,
            ));
        }

        info!(
            classifier = self.classifier.name(),
            clauses = clauses.len(),
            "Extracted clauses"
        );
        clauses
    }
}
