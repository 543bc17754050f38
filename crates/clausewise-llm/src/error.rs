//! LLM Error Types
//!
//! Every variant is recovered inside the analyzer; callers only ever see a
//! complete [`LlmAnalysis`](crate::LlmAnalysis).

use thiserror::Error;

/// Result type for LLM calls
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while talking to an LLM provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// Enrichment is switched off or no API key is available
    #[error("LLM backend disabled: {reason}")]
    Disabled { reason: String },

    /// Transport failure (connection, timeout, TLS)
    #[error("{provider} request failed: {message}")]
    Connection { provider: String, message: String },

    /// Provider answered with a non-success status
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    /// Provider answered successfully but without usable content
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },

    /// Response body did not match the provider's schema
    #[error("{provider} returned a malformed response: {message}")]
    Malformed { provider: String, message: String },

    /// Client construction failed
    #[error("Invalid LLM configuration: {message}")]
    InvalidConfig { message: String },
}

impl LlmError {
    /// Create a connection error
    pub fn connection(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an empty response error
    pub fn empty(provider: impl Into<String>) -> Self {
        Self::EmptyResponse {
            provider: provider.into(),
        }
    }
}
