//! # Clausewise LLM
//!
//! Optional narrative enrichment of contract analyses through OpenAI or
//! Anthropic chat APIs. The backend is resolved once from [`LlmConfig`];
//! a disabled backend and every failed call degrade to deterministic
//! templates, so [`LlmAnalyzer::analyze`] always returns a complete
//! [`LlmAnalysis`].

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod fallback;
pub mod prompts;
pub mod provider;

pub use analysis::{
    ClauseInterpretation, ComplianceCheck, LlmAnalysis, NegotiationPoint, RiskExplanation,
};
pub use analyzer::LlmAnalyzer;
pub use config::{LlmConfig, LlmProvider};
pub use error::{LlmError, LlmResult};
pub use provider::{AnthropicClient, LlmBackend, OpenAiClient, ProviderClient};
