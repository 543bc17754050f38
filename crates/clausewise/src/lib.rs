//! # Clausewise
//!
//! End-to-end contract analysis. [`ContractAnalyzer`] extracts the text of a
//! document, segments and classifies its clauses, summarizes them, detects
//! risks and optionally asks an LLM for a narrative review, returning a
//! single [`ContractAnalysis`].
//!
//! ```no_run
//! use clausewise::{AnalyzerConfig, ContractAnalyzer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnalyzerConfig::from_env()?;
//! let analyzer = ContractAnalyzer::from_config(&config)?;
//! let analysis = analyzer.analyze_file("contract.pdf").await?;
//! println!("{} risks found", analysis.risk_count);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;

pub use analyzer::{ContractAnalysis, ContractAnalyzer, Models, OVERALL_SUMMARY_CHARS};
pub use config::{AnalyzerConfig, ConfigError};

pub use clausewise_core as core;
pub use clausewise_extract as extract;
pub use clausewise_inference as inference;
pub use clausewise_llm as llm;

pub use clausewise_core::{
    Clause, ClauseStatistics, ClauseType, ClausewiseError, ClausewiseResult, DocumentError,
    KnowledgeBase, Risk, RiskCategory, RiskSummary, Severity,
};
pub use clausewise_extract::{DocumentInfo, TextExtractor};
pub use clausewise_llm::{LlmAnalysis, LlmConfig, LlmProvider};
