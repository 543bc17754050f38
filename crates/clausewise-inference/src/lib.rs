//! # Clausewise Inference
//!
//! HTTP backends for the model traits defined in `clausewise-core`:
//! zero-shot classification, summarization and sentiment, all served by a
//! hosted inference API.

pub mod backends;
pub mod client;

pub use backends::{
    DEFAULT_SENTIMENT_MODEL, DEFAULT_SUMMARIZATION_MODEL, DEFAULT_ZERO_SHOT_MODEL,
    HostedSentiment, HostedSummarizer, HostedZeroShot,
};
pub use client::{DEFAULT_BASE_URL, InferenceClient, InferenceConfig};
