//! Hosted implementations of the core model traits.

use crate::client::InferenceClient;
use async_trait::async_trait;
use clausewise_core::{
    ModelError, ModelResult, SentimentModel, SentimentOutput, SummarizationModel, ZeroShotModel,
    ZeroShotOutput,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ZERO_SHOT_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    hypothesis_template: &'a str,
}

/// Zero-shot classification endpoint.
#[derive(Debug, Clone)]
pub struct HostedZeroShot {
    client: InferenceClient,
    model: String,
}

impl HostedZeroShot {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ZeroShotModel for HostedZeroShot {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        hypothesis_template: &str,
    ) -> ModelResult<ZeroShotOutput> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels,
                hypothesis_template,
            },
        };
        let output: ZeroShotOutput = self.client.post(&self.model, &request).await?;

        if output.labels.is_empty() || output.labels.len() != output.scores.len() {
            return Err(ModelError::malformed(
                &self.model,
                format!(
                    "{} labels with {} scores",
                    output.labels.len(),
                    output.scores.len()
                ),
            ));
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Serialize)]
struct SummarizationParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

/// Summarization endpoint.
#[derive(Debug, Clone)]
pub struct HostedSummarizer {
    client: InferenceClient,
    model: String,
}

impl HostedSummarizer {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SummarizationModel for HostedSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> ModelResult<String> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                max_length,
                min_length,
                do_sample: false,
            },
        };
        let items: Vec<SummaryItem> = self.client.post(&self.model, &request).await?;

        items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or_else(|| ModelError::malformed(&self.model, "empty summary list"))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct SentimentRequest<'a> {
    inputs: &'a str,
}

/// Endpoints answer either `[[{label, score}, ...]]` or `[{label, score}, ...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SentimentResponse {
    Nested(Vec<Vec<SentimentOutput>>),
    Flat(Vec<SentimentOutput>),
}

/// Sentiment endpoint.
#[derive(Debug, Clone)]
pub struct HostedSentiment {
    client: InferenceClient,
    model: String,
}

impl HostedSentiment {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SentimentModel for HostedSentiment {
    async fn sentiment(&self, text: &str) -> ModelResult<SentimentOutput> {
        let response: SentimentResponse = self
            .client
            .post(&self.model, &SentimentRequest { inputs: text })
            .await?;

        let candidates = match response {
            SentimentResponse::Nested(mut outer) if !outer.is_empty() => outer.swap_remove(0),
            SentimentResponse::Nested(_) => Vec::new(),
            SentimentResponse::Flat(items) => items,
        };

        // Best label first, uppercased so "negative" and "NEGATIVE" agree.
        candidates
            .into_iter()
            .reduce(|best, cur| if cur.score > best.score { cur } else { best })
            .map(|best| SentimentOutput {
                label: best.label.to_uppercase(),
                score: best.score,
            })
            .ok_or_else(|| ModelError::malformed(&self.model, "no sentiment labels"))
    }

    fn name(&self) -> &str {
        &self.model
    }
}
