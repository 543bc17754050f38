//! LLM enrichment of a finished analysis.

use crate::analysis::{
    ClauseInterpretation, ComplianceCheck, LlmAnalysis, NegotiationPoint, RiskExplanation,
};
use crate::config::LlmConfig;
use crate::error::LlmResult;
use crate::fallback;
use crate::prompts;
use crate::provider::{LlmBackend, ProviderClient};
use clausewise_core::{Clause, Risk};
use tracing::{info, warn};

/// Produces an [`LlmAnalysis`] for a contract. Never fails.
///
/// The backend is resolved once. A disabled backend yields the static
/// fallback; an enabled one issues one call per item and replaces any failed
/// call with its template.
///
/// Enrichment is *requested* when the configuration switched it on, even if
/// the backend ended up disabled for lack of a credential. Callers attach an
/// analysis whenever it was requested.
#[derive(Debug)]
pub struct LlmAnalyzer {
    backend: LlmBackend,
    requested: bool,
}

impl LlmAnalyzer {
    /// Wrap an already resolved backend; enrichment counts as requested only
    /// when the backend is enabled.
    pub fn new(backend: LlmBackend) -> Self {
        let requested = backend.is_enabled();
        Self::with_request(backend, requested)
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::with_request(LlmBackend::resolve(config), config.enabled)
    }

    fn with_request(backend: LlmBackend, requested: bool) -> Self {
        if let LlmBackend::Disabled { reason } = &backend {
            info!(
                reason = %reason,
                requested = requested,
                "LLM enrichment disabled, using fallback analysis"
            );
        }
        Self { backend, requested }
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_enabled()
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub async fn analyze(&self, text: &str, clauses: &[Clause], risks: &[Risk]) -> LlmAnalysis {
        let client = match &self.backend {
            LlmBackend::Disabled { .. } => return fallback::fallback_analysis(clauses, risks),
            LlmBackend::Enabled(client) => client,
        };

        info!(
            provider = %client.provider(),
            model = client.model(),
            clauses = clauses.len(),
            risks = risks.len(),
            "Running LLM analysis"
        );

        let legal_insights = complete_or(
            client,
            "legal insights",
            &prompts::build_insights_prompt(text, clauses, risks),
        )
        .await
        .unwrap_or_else(|| fallback::unavailable("legal insights"));

        let mut risk_explanations = Vec::with_capacity(risks.len());
        for risk in risks {
            let explanation = complete_or(client, "risk explanation", &prompts::build_risk_prompt(risk))
                .await
                .unwrap_or_else(|| fallback::unavailable("risk explanation"));
            risk_explanations.push(RiskExplanation {
                risk_id: risk.category,
                explanation,
                severity: risk.severity,
                mitigation_suggestions: fallback::mitigation_suggestions(risk.category),
            });
        }

        let mut clause_interpretations = Vec::with_capacity(clauses.len());
        for clause in clauses {
            let interpretation = complete_or(
                client,
                "clause interpretation",
                &prompts::build_clause_prompt(clause),
            )
            .await
            .unwrap_or_else(|| fallback::unavailable("clause interpretation"));
            clause_interpretations.push(ClauseInterpretation {
                clause_type: clause.clause_type,
                interpretation,
                key_points: fallback::key_points(&clause.text),
                business_impact: fallback::business_impact(clause.clause_type).to_string(),
            });
        }

        let recommendations = complete_or(
            client,
            "recommendations",
            &prompts::build_recommendations_prompt(clauses, risks),
        )
        .await
        .map(|content| parse_recommendations(&content))
        .filter(|items| !items.is_empty())
        .unwrap_or_else(fallback::fallback_recommendations);

        let assessment = complete_or(
            client,
            "compliance check",
            &prompts::build_compliance_prompt(text),
        )
        .await
        .unwrap_or_else(|| fallback::unavailable("compliance check"));
        let compliance_check = ComplianceCheck {
            assessment,
            compliance_score: fallback::compliance_score(text),
            missing_clauses: fallback::missing_clauses(text),
            regulatory_concerns: fallback::regulatory_concerns(text),
        };

        let negotiation_points = complete_or(
            client,
            "negotiation points",
            &prompts::build_negotiation_prompt(clauses, risks),
        )
        .await
        .map(|content| parse_negotiation_points(&content))
        .filter(|points| !points.is_empty())
        .unwrap_or_else(fallback::fallback_negotiation_points);

        LlmAnalysis {
            legal_insights,
            risk_explanations,
            clause_interpretations,
            recommendations,
            compliance_check,
            negotiation_points,
        }
    }
}

/// Run one completion, logging and swallowing its failure.
async fn complete_or(client: &ProviderClient, task: &str, prompt: &str) -> Option<String> {
    let result: LlmResult<String> = client.complete(prompt).await;
    match result {
        Ok(content) => Some(content),
        Err(e) => {
            warn!(
                provider = %client.provider(),
                task = task,
                error = %e,
                "LLM call failed, using fallback"
            );
            None
        }
    }
}

/// Non-empty trimmed lines.
pub fn parse_recommendations(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Unindented lines open a topic; indented lines that follow are its details.
pub fn parse_negotiation_points(content: &str) -> Vec<NegotiationPoint> {
    let mut points: Vec<NegotiationPoint> = Vec::new();
    let mut details: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            if !points.is_empty() {
                details.push(line.trim());
            }
            continue;
        }
        if let Some(last) = points.last_mut() {
            last.details = details.join(" ");
            details.clear();
        }
        points.push(NegotiationPoint {
            topic: line.trim().to_string(),
            details: String::new(),
        });
    }
    if let Some(last) = points.last_mut() {
        last.details = details.join(" ");
    }

    points
}
