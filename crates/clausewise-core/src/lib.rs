//! # Clausewise Core
//!
//! Clause segmentation, classification, summarization and risk detection
//! for contract analysis. Model-backed stages are expressed as traits so the
//! pipeline can run with hosted inference, with test doubles, or fully
//! rule-based.

pub mod classify;
pub mod clause;
pub mod error;
pub mod knowledge;
pub mod model;
pub mod risk;
pub mod segment;
pub mod summarize;
pub mod text;

pub use classify::{
    Classification, ClassificationSource, Classifier, ClauseExtractor, ModelClassifier,
    RuleBasedClassifier,
};
pub use clause::{Clause, ClauseStatistics, ClauseType, clause_statistics};
pub use error::{
    ClausewiseError, ClausewiseResult, DocumentError, DocumentResult, KnowledgeError,
    KnowledgeResult, ModelError, ModelResult,
};
pub use knowledge::KnowledgeBase;
pub use model::{SentimentModel, SentimentOutput, SummarizationModel, ZeroShotModel, ZeroShotOutput};
pub use risk::{Risk, RiskCategory, RiskDetector, RiskSummary, Severity, risk_summary};
pub use segment::Segmenter;
pub use summarize::{
    ExtractiveSummarizer, ModelSummarizer, Summarizer, SummaryStatistics, summarize_clauses,
    summary_statistics,
};
