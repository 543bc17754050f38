//! Integration tests for environment-based configuration

use clausewise::{AnalyzerConfig, ConfigError, LlmProvider};
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "CLAUSEWISE_ENABLE_LLM",
    "CLAUSEWISE_LLM_PROVIDER",
    "CLAUSEWISE_LLM_MODEL",
    "CLAUSEWISE_LLM_MAX_TOKENS",
    "CLAUSEWISE_LLM_TEMPERATURE",
    "CLAUSEWISE_LLM_BASE_URL",
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "CLAUSEWISE_INFERENCE_URL",
    "CLAUSEWISE_INFERENCE_TOKEN",
    "CLAUSEWISE_KNOWLEDGE_PATH",
    "CLAUSEWISE_MIN_DOCUMENT_CHARS",
];

/// Helper to set environment variable for test
fn set_env(key: &str, value: &str) {
    unsafe {
        env::set_var(key, value);
    }
}

fn clear_all_clausewise_env_vars() {
    for key in VARS {
        unsafe {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_env_config_defaults() {
    clear_all_clausewise_env_vars();

    let config = AnalyzerConfig::from_env().expect("should load defaults");

    assert!(!config.llm.enabled);
    assert_eq!(config.llm.provider, LlmProvider::OpenAi);
    assert_eq!(config.llm.model_name(), "gpt-4");
    assert_eq!(config.llm.max_tokens, 2000);
    assert!((config.llm.temperature - 0.3).abs() < f32::EPSILON);
    assert!(config.inference.is_none());
    assert!(config.knowledge_path.is_none());
    assert_eq!(config.min_document_chars, 100);
}

#[test]
#[serial]
fn test_env_config_anthropic_provider() {
    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_ENABLE_LLM", "true");
    set_env("CLAUSEWISE_LLM_PROVIDER", "Anthropic");
    set_env("ANTHROPIC_API_KEY", "sk-ant-test");
    set_env("OPENAI_API_KEY", "sk-openai-test");
    set_env("CLAUSEWISE_LLM_MAX_TOKENS", "512");

    let config = AnalyzerConfig::from_env().expect("should load config");

    assert!(config.llm.enabled);
    assert_eq!(config.llm.provider, LlmProvider::Anthropic);
    assert_eq!(config.llm.model_name(), "claude-3-sonnet-20240229");
    assert_eq!(config.llm.api_key.as_deref(), Some("sk-ant-test"));
    assert_eq!(config.llm.max_tokens, 512);

    clear_all_clausewise_env_vars();
}

#[test]
#[serial]
fn test_env_config_inference_token_uses_default_url() {
    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_INFERENCE_TOKEN", "hf_test");

    let config = AnalyzerConfig::from_env().expect("should load config");
    let inference = config.inference.expect("inference configured");
    assert_eq!(inference.base_url.as_str(), "https://api-inference.huggingface.co/");
    assert_eq!(inference.token.as_deref(), Some("hf_test"));

    clear_all_clausewise_env_vars();
}

#[test]
#[serial]
fn test_env_config_invalid_bool() {
    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_ENABLE_LLM", "maybe");

    match AnalyzerConfig::from_env() {
        Err(ConfigError::InvalidEnvVar { key, message }) => {
            assert_eq!(key, "CLAUSEWISE_ENABLE_LLM");
            assert!(message.contains("maybe"));
        }
        other => panic!("Expected InvalidEnvVar error, got {other:?}"),
    }

    clear_all_clausewise_env_vars();
}

#[test]
#[serial]
fn test_env_config_invalid_provider() {
    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_LLM_PROVIDER", "cohere");

    match AnalyzerConfig::from_env() {
        Err(ConfigError::InvalidEnvVar { key, .. }) => {
            assert_eq!(key, "CLAUSEWISE_LLM_PROVIDER");
        }
        other => panic!("Expected InvalidEnvVar error, got {other:?}"),
    }

    clear_all_clausewise_env_vars();
}

#[test]
#[serial]
fn test_env_config_invalid_number_and_url() {
    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_MIN_DOCUMENT_CHARS", "-5");
    assert!(matches!(
        AnalyzerConfig::from_env(),
        Err(ConfigError::InvalidEnvVar { .. })
    ));

    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_INFERENCE_URL", "not a url");
    assert!(matches!(
        AnalyzerConfig::from_env(),
        Err(ConfigError::InvalidEnvVar { .. })
    ));

    clear_all_clausewise_env_vars();
}

#[test]
#[serial]
fn test_env_config_temperature_out_of_range() {
    clear_all_clausewise_env_vars();
    set_env("CLAUSEWISE_LLM_TEMPERATURE", "4.0");

    assert!(matches!(
        AnalyzerConfig::from_env(),
        Err(ConfigError::ValidationError(_))
    ));

    clear_all_clausewise_env_vars();
}
