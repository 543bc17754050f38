//! Deduplication, ordering and aggregation of risk lists.

use super::types::{Risk, RiskSummary, Severity};
use std::collections::HashSet;

/// Drop risks whose dedup key was already seen; the first occurrence wins.
pub fn deduplicate(risks: Vec<Risk>) -> Vec<Risk> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(risks.len());
    for risk in risks {
        let (category, prefix) = risk.dedup_key();
        if seen.insert((category, prefix.to_string())) {
            unique.push(risk);
        }
    }
    unique
}

/// Stable sort, most severe first.
pub fn sort_by_severity(risks: &mut [Risk]) {
    risks.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));
}

/// Concatenate detector outputs, deduplicate, then order by severity.
pub fn merge_risks<I>(sources: I) -> Vec<Risk>
where
    I: IntoIterator<Item = Vec<Risk>>,
{
    let mut merged = deduplicate(sources.into_iter().flatten().collect());
    sort_by_severity(&mut merged);
    merged
}

/// Count risks by severity and category and derive the overall level.
///
/// Any high risk makes the document high risk; more than two medium risks
/// make it medium; otherwise it is low.
pub fn risk_summary(risks: &[Risk]) -> RiskSummary {
    let mut summary = RiskSummary {
        total_risks: risks.len(),
        ..RiskSummary::default()
    };

    for risk in risks {
        match risk.severity {
            Severity::High => summary.high_risks += 1,
            Severity::Medium => summary.medium_risks += 1,
            Severity::Low => summary.low_risks += 1,
            Severity::Unknown => {}
        }
        *summary.risk_categories.entry(risk.category).or_default() += 1;
    }

    summary.overall_risk_level = if summary.high_risks > 0 {
        Severity::High
    } else if summary.medium_risks > 2 {
        Severity::Medium
    } else {
        Severity::Low
    };
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::RiskCategory;

    fn risk(category: RiskCategory, text: &str, severity: Severity) -> Risk {
        Risk::new(category, text, severity, 0.5)
    }

    #[test]
    fn test_deduplicate_keeps_first() {
        let risks = vec![
            risk(RiskCategory::PenaltyFees, "late fee", Severity::Medium).with_sentiment_score(0.1),
            risk(RiskCategory::PenaltyFees, "late fee", Severity::High),
            risk(RiskCategory::AutoRenewal, "late fee", Severity::High),
        ];
        let unique = deduplicate(risks);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].sentiment_score, Some(0.1));
    }

    #[test]
    fn test_sort_is_stable() {
        let mut risks = vec![
            risk(RiskCategory::ExclusiveTerms, "a", Severity::Low),
            risk(RiskCategory::PenaltyFees, "b", Severity::Medium),
            risk(RiskCategory::DataOwnership, "c", Severity::Medium),
            risk(RiskCategory::AutoRenewal, "d", Severity::High),
            risk(RiskCategory::GeneralRisk, "e", Severity::Unknown),
        ];
        sort_by_severity(&mut risks);
        let texts: Vec<_> = risks.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["d", "b", "c", "a", "e"]);
    }

    #[test]
    fn test_merge_dedups_across_sources() {
        let rules = vec![risk(RiskCategory::PenaltyFees, "late fee", Severity::Medium)];
        let clauses = vec![
            risk(RiskCategory::PenaltyFees, "late fee", Severity::Medium),
            risk(RiskCategory::UnlimitedLiability, "no cap", Severity::High),
        ];
        let merged = merge_risks([rules, clauses]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].category, RiskCategory::UnlimitedLiability);
    }

    #[test]
    fn test_empty_summary() {
        let summary = risk_summary(&[]);
        assert_eq!(summary, RiskSummary::default());
        assert_eq!(summary.overall_risk_level, Severity::Low);
    }

    #[test]
    fn test_overall_level() {
        let medium = |t: &str| risk(RiskCategory::PenaltyFees, t, Severity::Medium);

        let two = risk_summary(&[medium("a"), medium("b")]);
        assert_eq!(two.overall_risk_level, Severity::Low);

        let three = risk_summary(&[medium("a"), medium("b"), medium("c")]);
        assert_eq!(three.overall_risk_level, Severity::Medium);
        assert_eq!(three.risk_categories[&RiskCategory::PenaltyFees], 3);

        let high = risk_summary(&[risk(RiskCategory::AutoRenewal, "x", Severity::High)]);
        assert_eq!(high.overall_risk_level, Severity::High);
        assert_eq!(high.high_risks, 1);
    }

    #[test]
    fn test_unknown_severity_counts_only_in_total() {
        let summary = risk_summary(&[risk(RiskCategory::GeneralRisk, "x", Severity::Unknown)]);
        assert_eq!(summary.total_risks, 1);
        assert_eq!(summary.high_risks + summary.medium_risks + summary.low_risks, 0);
    }
}
