//! Shared HTTP client for a hosted inference API.
//!
//! Requests are `POST {base_url}/models/{model}` with a JSON body and an
//! optional bearer token, the layout used by Hugging Face style inference
//! endpoints. There are no retries; a failed call surfaces as a
//! [`ModelError`] and the calling stage falls back.

use clausewise_core::{ModelError, ModelResult};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Public Hugging Face inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the inference API.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl InferenceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client shared by all hosted backends.
#[derive(Clone)]
pub struct InferenceClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> ModelResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("clausewise/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ModelError::request("inference", format!("Failed to create HTTP client: {}", e))
            })?;

        // `Url::join` drops the last path segment unless it ends with '/'.
        let mut base_url = config.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> ModelResult<Url> {
        self.base_url
            .join(&format!("models/{model}"))
            .map_err(|e| ModelError::request(model, format!("Invalid endpoint: {}", e)))
    }

    /// POST `body` to the model endpoint and decode the JSON answer.
    pub async fn post<B, R>(&self, model: &str, body: &B) -> ModelResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(model)?;
        debug!(url = %url, model = model, "Calling inference endpoint");

        let mut request = self.http.post(url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ModelError::request(model, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ModelError::request(
                model,
                format!("HTTP {}: {}", status.as_u16(), detail),
            ));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ModelError::malformed(model, e.to_string()))
    }
}
