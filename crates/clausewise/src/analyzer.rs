//! Analysis pipeline.
//!
//! Stages run sequentially for each document: extraction, clause
//! extraction, clause summaries, risk detection, overall summary and the
//! optional LLM review. Models and the LLM backend are built once in
//! [`ContractAnalyzer::from_config`] and shared read-only afterwards.

use crate::config::AnalyzerConfig;
use chrono::{DateTime, Utc};
use clausewise_core::text::{char_len, truncate_chars};
use clausewise_core::{
    Classifier, Clause, ClauseExtractor, ClauseStatistics, ClausewiseResult, DocumentError,
    ExtractiveSummarizer, KnowledgeBase, ModelClassifier, ModelResult, ModelSummarizer, Risk,
    RiskDetector, RiskSummary, RuleBasedClassifier, SentimentModel, SummarizationModel,
    Summarizer, ZeroShotModel, clause_statistics, risk_summary, summarize_clauses,
};
use clausewise_extract::TextExtractor;
use clausewise_inference::{
    DEFAULT_SENTIMENT_MODEL, DEFAULT_SUMMARIZATION_MODEL, DEFAULT_ZERO_SHOT_MODEL,
    HostedSentiment, HostedSummarizer, HostedZeroShot, InferenceClient, InferenceConfig,
};
use clausewise_llm::{LlmAnalysis, LlmAnalyzer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Leading characters of the document used for the overall summary.
pub const OVERALL_SUMMARY_CHARS: usize = 2000;

/// Complete result for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAnalysis {
    pub filename: String,
    pub overall_summary: String,
    pub clauses: Vec<Clause>,
    pub risks: Vec<Risk>,
    pub total_clauses: usize,
    pub risk_count: usize,
    pub risk_summary: RiskSummary,
    pub clause_statistics: ClauseStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_analysis: Option<LlmAnalysis>,
    pub analyzed_at: DateTime<Utc>,
}

/// Optional model backends. Every `None` stage runs its deterministic
/// fallback.
#[derive(Clone, Default)]
pub struct Models {
    pub zero_shot: Option<Arc<dyn ZeroShotModel>>,
    pub summarization: Option<Arc<dyn SummarizationModel>>,
    pub sentiment: Option<Arc<dyn SentimentModel>>,
}

impl Models {
    /// Hosted backends sharing one HTTP client.
    pub fn hosted(config: InferenceConfig) -> ModelResult<Self> {
        let client = InferenceClient::new(config)?;
        Ok(Self {
            zero_shot: Some(Arc::new(HostedZeroShot::new(
                client.clone(),
                DEFAULT_ZERO_SHOT_MODEL,
            ))),
            summarization: Some(Arc::new(HostedSummarizer::new(
                client.clone(),
                DEFAULT_SUMMARIZATION_MODEL,
            ))),
            sentiment: Some(Arc::new(HostedSentiment::new(client, DEFAULT_SENTIMENT_MODEL))),
        })
    }
}

impl std::fmt::Debug for Models {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Models")
            .field("zero_shot", &self.zero_shot.as_ref().map(|m| m.name()))
            .field("summarization", &self.summarization.as_ref().map(|m| m.name()))
            .field("sentiment", &self.sentiment.as_ref().map(|m| m.name()))
            .finish()
    }
}

/// The contract analysis pipeline.
pub struct ContractAnalyzer {
    knowledge: Arc<KnowledgeBase>,
    extractor: TextExtractor,
    clauses: ClauseExtractor,
    summarizer: Arc<dyn Summarizer>,
    risks: RiskDetector,
    llm: LlmAnalyzer,
    min_document_chars: usize,
}

impl ContractAnalyzer {
    /// Assemble a pipeline from explicit parts.
    ///
    /// A zero-shot model selects [`ModelClassifier`], otherwise
    /// [`RuleBasedClassifier`]; the summarizer is chosen the same way.
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        models: Models,
        llm: LlmAnalyzer,
        min_document_chars: usize,
    ) -> ClausewiseResult<Self> {
        let classifier: Arc<dyn Classifier> = match models.zero_shot {
            Some(model) => Arc::new(ModelClassifier::new(Some(model), Arc::clone(&knowledge))),
            None => Arc::new(RuleBasedClassifier::new(Arc::clone(&knowledge))),
        };
        let summarizer: Arc<dyn Summarizer> = match models.summarization {
            Some(model) => Arc::new(ModelSummarizer::new(Some(model), Arc::clone(&knowledge))),
            None => Arc::new(ExtractiveSummarizer::new(Arc::clone(&knowledge))),
        };

        info!(
            knowledge_version = knowledge.version(),
            classifier = classifier.name(),
            summarizer = summarizer.name(),
            sentiment = models.sentiment.is_some(),
            llm = llm.is_enabled(),
            "Contract analyzer ready"
        );

        Ok(Self {
            clauses: ClauseExtractor::new(&knowledge, classifier)?,
            risks: RiskDetector::new(Arc::clone(&knowledge), models.sentiment),
            extractor: TextExtractor::new(),
            summarizer,
            llm,
            min_document_chars,
            knowledge,
        })
    }

    /// Build the pipeline described by `config`.
    pub fn from_config(config: &AnalyzerConfig) -> ClausewiseResult<Self> {
        let knowledge = match &config.knowledge_path {
            Some(path) => {
                info!(path = %path.display(), "Loading knowledge tables");
                KnowledgeBase::from_file(path)?
            }
            None => KnowledgeBase::builtin()?,
        };

        let models = match &config.inference {
            Some(inference) => {
                info!(base_url = %inference.base_url, "Using hosted inference models");
                Models::hosted(inference.clone())?
            }
            None => Models::default(),
        };

        Self::new(
            Arc::new(knowledge),
            models,
            LlmAnalyzer::from_config(&config.llm),
            config.min_document_chars,
        )
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_enabled()
    }

    /// Extract the text of `path` and analyze it.
    pub async fn analyze_file(&self, path: impl AsRef<Path>) -> ClausewiseResult<ContractAnalysis> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.analyze_file_as(path, &filename).await
    }

    /// Like [`analyze_file`](Self::analyze_file), reporting `filename`
    /// instead of the name on disk.
    pub async fn analyze_file_as(
        &self,
        path: impl AsRef<Path>,
        filename: &str,
    ) -> ClausewiseResult<ContractAnalysis> {
        let path = path.as_ref().to_path_buf();

        info!(path = %path.display(), "Extracting text from document");
        let extractor = self.extractor.clone();
        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&path))
            .await
            .map_err(|e| DocumentError::Io(std::io::Error::other(e)))??;

        self.analyze_text(filename, &text).await
    }

    /// Analyze already extracted text.
    pub async fn analyze_text(&self, filename: &str, text: &str) -> ClausewiseResult<ContractAnalysis> {
        let length = char_len(text.trim());
        if length < self.min_document_chars {
            warn!(
                filename = filename,
                length = length,
                minimum = self.min_document_chars,
                "Document text is too short"
            );
            return Err(DocumentError::TooShort {
                length,
                minimum: self.min_document_chars,
            }
            .into());
        }
        info!(filename = filename, text_length = length, "Analyzing contract");

        let clauses = self.clauses.extract_clauses(text).await;
        let clauses = summarize_clauses(self.summarizer.as_ref(), clauses).await;

        let risks = self.risks.detect_risks(text, &clauses).await;
        info!(risks = risks.len(), "Risk detection completed");

        let overall_summary = self
            .summarizer
            .summarize(truncate_chars(text, OVERALL_SUMMARY_CHARS), None)
            .await;

        let llm_analysis = if self.llm.is_requested() {
            info!("Performing LLM analysis");
            Some(self.llm.analyze(text, &clauses, &risks).await)
        } else {
            None
        };

        Ok(ContractAnalysis {
            filename: filename.to_string(),
            overall_summary,
            total_clauses: clauses.len(),
            risk_count: risks.len(),
            risk_summary: risk_summary(&risks),
            clause_statistics: clause_statistics(&clauses),
            clauses,
            risks,
            llm_analysis,
            analyzed_at: Utc::now(),
        })
    }
}
