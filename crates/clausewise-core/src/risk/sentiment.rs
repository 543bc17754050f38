//! Sentiment-based risk detection.
//!
//! Negative sentences that also carry obligation language are reported as
//! `general_risk`. A failing model ends the scan but keeps what was found.

use super::types::{Risk, RiskCategory};
use crate::knowledge::KnowledgeBase;
use crate::model::SentimentModel;
use crate::text::{char_len, split_sentences};
use tracing::warn;

pub async fn detect_sentiment_risks(
    knowledge: &KnowledgeBase,
    model: &dyn SentimentModel,
    text: &str,
) -> Vec<Risk> {
    let settings = knowledge.sentiment();
    let severity = knowledge.severity_for(RiskCategory::GeneralRisk);
    let mut risks = Vec::new();

    let sentences = split_sentences(text)
        .into_iter()
        .filter(|s| char_len(s) > settings.min_sentence_chars)
        .take(settings.max_sentences);

    for sentence in sentences {
        let output = match model.sentiment(sentence).await {
            Ok(output) => output,
            Err(e) => {
                warn!(
                    model = model.name(),
                    error = %e,
                    found = risks.len(),
                    "Sentiment analysis failed, stopping scan"
                );
                break;
            }
        };

        if !output.label.eq_ignore_ascii_case(&settings.negative_label)
            || output.score <= settings.threshold
        {
            continue;
        }

        let lowered = sentence.to_lowercase();
        if settings
            .indicators
            .iter()
            .any(|indicator| lowered.contains(indicator.as_str()))
        {
            risks.push(
                Risk::new(RiskCategory::GeneralRisk, sentence, severity, output.score)
                    .with_sentiment_score(output.score),
            );
        }
    }

    risks
}
