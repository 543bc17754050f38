//! Provider clients.
//!
//! One client per provider wire format. [`ProviderClient`] is resolved once
//! from configuration; each call is a single non-streaming completion.

use crate::config::{LlmConfig, LlmProvider};
use crate::error::{LlmError, LlmResult};
use crate::prompts::SYSTEM_PROMPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Settings shared by both provider clients.
#[derive(Clone)]
struct Endpoint {
    http: Client,
    base_url: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl Endpoint {
    fn new(config: &LlmConfig, api_key: &str) -> LlmResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("clausewise/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LlmError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        let mut base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(config.provider.default_base_url()).map_err(|e| {
                LlmError::InvalidConfig {
                    message: e.to_string(),
                }
            })?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
            model: config.model_name().to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn url(&self, provider: &str, path: &str) -> LlmResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LlmError::connection(provider, format!("Invalid endpoint: {}", e)))
    }
}

async fn read_json<R: for<'de> Deserialize<'de>>(
    provider: &str,
    response: reqwest::Response,
) -> LlmResult<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LlmError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| LlmError::malformed(provider, e.to_string()))
}

fn non_empty(provider: &str, content: Option<String>) -> LlmResult<String> {
    content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| LlmError::empty(provider))
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI chat completions client.
#[derive(Clone)]
pub struct OpenAiClient {
    endpoint: Endpoint,
}

impl OpenAiClient {
    const NAME: &'static str = "openai";

    pub async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let url = self.endpoint.url(Self::NAME, "v1/chat/completions")?;
        let body = ChatRequest {
            model: &self.endpoint.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.endpoint.max_tokens,
            temperature: self.endpoint.temperature,
        };

        debug!(url = %url, model = %self.endpoint.model, "Calling OpenAI");
        let response = self
            .endpoint
            .http
            .post(url)
            .bearer_auth(&self.endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::connection(Self::NAME, e.to_string()))?;

        let parsed: ChatResponse = read_json(Self::NAME, response).await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        non_empty(Self::NAME, content)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic messages client.
#[derive(Clone)]
pub struct AnthropicClient {
    endpoint: Endpoint,
}

impl AnthropicClient {
    const NAME: &'static str = "anthropic";

    pub async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let url = self.endpoint.url(Self::NAME, "v1/messages")?;
        let body = MessagesRequest {
            model: &self.endpoint.model,
            max_tokens: self.endpoint.max_tokens,
            temperature: self.endpoint.temperature,
            system: SYSTEM_PROMPT,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(url = %url, model = %self.endpoint.model, "Calling Anthropic");
        let response = self
            .endpoint
            .http
            .post(url)
            .header("x-api-key", &self.endpoint.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::connection(Self::NAME, e.to_string()))?;

        let parsed: MessagesResponse = read_json(Self::NAME, response).await?;
        let content = parsed.content.into_iter().find_map(|block| block.text);
        non_empty(Self::NAME, content)
    }
}

/// A configured provider.
#[derive(Clone)]
pub enum ProviderClient {
    OpenAi(OpenAiClient),
    Anthropic(AnthropicClient),
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("provider", &self.provider())
            .field("model", &self.model())
            .finish()
    }
}

impl ProviderClient {
    pub fn new(config: &LlmConfig, api_key: &str) -> LlmResult<Self> {
        let endpoint = Endpoint::new(config, api_key)?;
        Ok(match config.provider {
            LlmProvider::OpenAi => ProviderClient::OpenAi(OpenAiClient { endpoint }),
            LlmProvider::Anthropic => ProviderClient::Anthropic(AnthropicClient { endpoint }),
        })
    }

    pub fn provider(&self) -> LlmProvider {
        match self {
            ProviderClient::OpenAi(_) => LlmProvider::OpenAi,
            ProviderClient::Anthropic(_) => LlmProvider::Anthropic,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderClient::OpenAi(client) => &client.endpoint.model,
            ProviderClient::Anthropic(client) => &client.endpoint.model,
        }
    }

    /// Single completion for `prompt`, trimmed. Empty content is an error.
    pub async fn complete(&self, prompt: &str) -> LlmResult<String> {
        match self {
            ProviderClient::OpenAi(client) => client.complete(prompt).await,
            ProviderClient::Anthropic(client) => client.complete(prompt).await,
        }
    }
}

/// Result of resolving the configuration, done once at start-up.
#[derive(Debug, Clone)]
pub enum LlmBackend {
    Disabled { reason: String },
    Enabled(ProviderClient),
}

impl LlmBackend {
    /// Resolve `config`: disabled when switched off or when no API key is set.
    pub fn resolve(config: &LlmConfig) -> Self {
        if !config.enabled {
            return LlmBackend::Disabled {
                reason: "LLM enrichment is switched off".to_string(),
            };
        }

        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return LlmBackend::Disabled {
                reason: format!(
                    "{} is not set for provider {}",
                    config.provider.api_key_var(),
                    config.provider
                ),
            };
        };

        match ProviderClient::new(config, api_key) {
            Ok(client) => LlmBackend::Enabled(client),
            Err(e) => LlmBackend::Disabled {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, LlmBackend::Enabled(_))
    }
}
