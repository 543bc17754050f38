//! # Environment-Based Configuration
//!
//! `.env` files are loaded by the binaries (via `dotenvy`) before
//! [`AnalyzerConfig::from_env`] runs, so both sources behave the same.
//!
//! ## Environment Variables
//!
//! ### LLM Enrichment
//! - `CLAUSEWISE_ENABLE_LLM` - Enable LLM enrichment (default: false)
//! - `CLAUSEWISE_LLM_PROVIDER` - `openai` or `anthropic` (default: openai)
//! - `CLAUSEWISE_LLM_MODEL` - Model name (default: provider specific)
//! - `CLAUSEWISE_LLM_MAX_TOKENS` - Completion token limit (default: 2000)
//! - `CLAUSEWISE_LLM_TEMPERATURE` - Sampling temperature 0.0-2.0 (default: 0.3)
//! - `CLAUSEWISE_LLM_BASE_URL` - Override the provider API base URL
//! - `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` - Provider credentials
//!
//! ### Model Inference
//! - `CLAUSEWISE_INFERENCE_URL` - Hosted inference base URL
//! - `CLAUSEWISE_INFERENCE_TOKEN` - Bearer token for the inference API
//!
//! Hosted models are used only when one of the two is set; otherwise every
//! stage runs rule-based.
//!
//! ### Pipeline
//! - `CLAUSEWISE_KNOWLEDGE_PATH` - Replacement knowledge tables (TOML)
//! - `CLAUSEWISE_MIN_DOCUMENT_CHARS` - Minimum extracted text length (default: 100)

use clausewise_inference::{DEFAULT_BASE_URL, InferenceConfig};
use clausewise_llm::{LlmConfig, LlmProvider};
use std::{env, path::PathBuf};
use url::Url;

/// Default minimum document length, in characters.
pub const DEFAULT_MIN_DOCUMENT_CHARS: usize = 100;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub llm: LlmConfig,
    /// Hosted inference settings; `None` runs every stage rule-based.
    pub inference: Option<InferenceConfig>,
    pub knowledge_path: Option<PathBuf>,
    pub min_document_chars: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            inference: None,
            knowledge_path: None,
            min_document_chars: DEFAULT_MIN_DOCUMENT_CHARS,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value
    /// or if the configuration fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // LLM enrichment
        let mut llm = LlmConfig::default();
        if let Some(enabled) = get_env_bool("CLAUSEWISE_ENABLE_LLM")? {
            llm.enabled = enabled;
        }
        if let Some(provider) = get_env_string("CLAUSEWISE_LLM_PROVIDER") {
            llm.provider = provider
                .parse::<LlmProvider>()
                .map_err(|message| ConfigError::InvalidEnvVar {
                    key: "CLAUSEWISE_LLM_PROVIDER".to_string(),
                    message,
                })?;
        }
        llm.model = get_env_string("CLAUSEWISE_LLM_MODEL");
        if let Some(max_tokens) = get_env_u32("CLAUSEWISE_LLM_MAX_TOKENS")? {
            llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = get_env_f32("CLAUSEWISE_LLM_TEMPERATURE")? {
            llm.temperature = temperature;
        }
        llm.base_url = get_env_url("CLAUSEWISE_LLM_BASE_URL")?;
        llm.api_key = get_env_string(llm.provider.api_key_var());
        config.llm = llm;

        // Model inference
        let inference_url = get_env_url("CLAUSEWISE_INFERENCE_URL")?;
        let inference_token = get_env_string("CLAUSEWISE_INFERENCE_TOKEN");
        if inference_url.is_some() || inference_token.is_some() {
            let base_url = match inference_url {
                Some(url) => url,
                None => Url::parse(DEFAULT_BASE_URL)
                    .map_err(|e| ConfigError::ValidationError(e.to_string()))?,
            };
            let mut inference = InferenceConfig::new(base_url);
            if let Some(token) = inference_token {
                inference = inference.with_token(token);
            }
            config.inference = Some(inference);
        }

        // Pipeline
        config.knowledge_path = get_env_string("CLAUSEWISE_KNOWLEDGE_PATH").map(PathBuf::from);
        if let Some(min_chars) = get_env_usize("CLAUSEWISE_MIN_DOCUMENT_CHARS")? {
            config.min_document_chars = min_chars;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "llm.max_tokens must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.min_document_chars == 0 {
            return Err(ConfigError::ValidationError(
                "min_document_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// Environment variable helper functions

/// Non-empty value of `key`.
pub fn get_env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn get_env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match get_env_string(key) {
        Some(val) => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!(
                    "invalid boolean value '{val}', expected true/false/1/0/yes/no/on/off"
                ),
            }),
        },
        None => Ok(None),
    }
}

pub fn get_env_u16(key: &str) -> Result<Option<u16>, ConfigError> {
    get_env_parsed(key, "u16")
}

pub fn get_env_u32(key: &str) -> Result<Option<u32>, ConfigError> {
    get_env_parsed(key, "u32")
}

pub fn get_env_usize(key: &str) -> Result<Option<usize>, ConfigError> {
    get_env_parsed(key, "usize")
}

pub fn get_env_f32(key: &str) -> Result<Option<f32>, ConfigError> {
    get_env_parsed(key, "f32")
}

pub fn get_env_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_env_parsed(key, "URL")
}

fn get_env_parsed<T>(key: &str, kind: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_string(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid {kind} value '{val}': {e}"),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.llm.enabled);
        assert!(config.inference.is_none());
        assert_eq!(config.min_document_chars, 100);
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        let mut config = AnalyzerConfig::default();
        config.llm.temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
