//! LLM analyzer tests against mocked provider endpoints

use clausewise_core::{Clause, ClauseType, Risk, RiskCategory, Severity};
use clausewise_llm::fallback;
use clausewise_llm::{LlmAnalyzer, LlmConfig, LlmProvider};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CONTRACT: &str = "This agreement automatically renews each year. \
    The customer shall pay all invoices and data is shared with the vendor. \
    Governing law is the State of Delaware.";

fn clauses() -> Vec<Clause> {
    vec![
        Clause::new(ClauseType::Payment, "The customer shall pay all invoices.", 0.8),
        Clause::new(ClauseType::GoverningLaw, "Governing law is Delaware.", 0.8),
    ]
}

fn risks() -> Vec<Risk> {
    vec![Risk::new(
        RiskCategory::AutoRenewal,
        "automatically renews each year",
        Severity::High,
        0.8,
    )]
}

fn config(provider: LlmProvider, server: &MockServer) -> LlmConfig {
    LlmConfig::enabled(provider, "test-key").with_base_url(Url::parse(&server.uri()).unwrap())
}

fn openai_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

#[tokio::test]
async fn test_openai_enriches_every_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(openai_reply("Topic one\n  Detail a.\nTopic two\n  Detail b."))
        .expect(7)
        .mount(&server)
        .await;

    let analyzer = LlmAnalyzer::from_config(&config(LlmProvider::OpenAi, &server));
    assert!(analyzer.is_enabled());

    let analysis = analyzer.analyze(CONTRACT, &clauses(), &risks()).await;

    assert!(analysis.legal_insights.starts_with("Topic one"));
    assert_eq!(analysis.risk_explanations.len(), 1);
    assert_eq!(analysis.risk_explanations[0].risk_id, RiskCategory::AutoRenewal);
    assert_eq!(
        analysis.risk_explanations[0].mitigation_suggestions[0],
        "Add explicit termination notice requirements"
    );
    assert_eq!(analysis.clause_interpretations.len(), 2);
    assert_eq!(
        analysis.clause_interpretations[0].key_points,
        vec!["Contains 'shall' obligations"]
    );
    assert_eq!(
        analysis.clause_interpretations[0].business_impact,
        "Financial impact"
    );
    assert_eq!(analysis.recommendations.len(), 4);
    assert!(analysis.compliance_check.assessment.starts_with("Topic one"));
    assert!((analysis.compliance_check.compliance_score - 0.2).abs() < 1e-9);
    assert_eq!(
        analysis.compliance_check.regulatory_concerns,
        vec!["Data handling without privacy provisions"]
    );
    assert_eq!(analysis.negotiation_points.len(), 2);
    assert_eq!(analysis.negotiation_points[1].topic, "Topic two");
    assert_eq!(analysis.negotiation_points[1].details, "Detail b.");
}

#[tokio::test]
async fn test_anthropic_uses_messages_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{ "type": "text", "text": "  Plain English answer.  " }]
        })))
        .mount(&server)
        .await;

    let analyzer = LlmAnalyzer::from_config(&config(LlmProvider::Anthropic, &server));
    let analysis = analyzer.analyze(CONTRACT, &clauses(), &risks()).await;

    assert_eq!(analysis.legal_insights, "Plain English answer.");
    assert_eq!(
        analysis.clause_interpretations[1].interpretation,
        "Plain English answer."
    );
    assert_eq!(analysis.recommendations, vec!["Plain English answer."]);
}

#[tokio::test]
async fn test_failed_call_degrades_only_that_item() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Translate this legal clause"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("actionable recommendations"))
        .respond_with(openai_reply("   "))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(openai_reply("Model answer"))
        .mount(&server)
        .await;

    let analyzer = LlmAnalyzer::from_config(&config(LlmProvider::OpenAi, &server));
    let analysis = analyzer.analyze(CONTRACT, &clauses(), &risks()).await;

    assert_eq!(analysis.legal_insights, "Model answer");
    assert_eq!(analysis.risk_explanations[0].explanation, "Model answer");
    for interpretation in &analysis.clause_interpretations {
        assert_eq!(
            interpretation.interpretation,
            fallback::unavailable("clause interpretation")
        );
    }
    assert_eq!(analysis.recommendations, fallback::fallback_recommendations());
    assert_eq!(analysis.compliance_check.assessment, "Model answer");
}

#[tokio::test]
async fn test_disabled_backend_fills_every_field() {
    let analyzer = LlmAnalyzer::from_config(&LlmConfig::default());
    let risks = risks();
    let analysis = analyzer.analyze(CONTRACT, &clauses(), &risks).await;

    assert!(!analysis.legal_insights.is_empty());
    assert_eq!(analysis.risk_explanations.len(), risks.len());
    assert_eq!(analysis.clause_interpretations.len(), 2);
    assert!(!analysis.recommendations.is_empty());
    assert!(!analysis.compliance_check.assessment.is_empty());
    assert!(!analysis.negotiation_points.is_empty());
}

#[tokio::test]
async fn test_missing_api_key_disables_backend() {
    let mut config = LlmConfig::enabled(LlmProvider::Anthropic, "");
    config.api_key = None;
    let analyzer = LlmAnalyzer::from_config(&config);
    assert!(!analyzer.is_enabled());

    let analysis = analyzer.analyze(CONTRACT, &[], &[]).await;
    assert_eq!(analysis.legal_insights, fallback::FALLBACK_INSIGHTS);
}
