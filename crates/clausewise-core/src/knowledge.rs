//! Versioned knowledge tables.
//!
//! Clause patterns, risk categories, risk rules, clause rules, sentiment
//! settings and stopwords are data rather than code. The default tables are
//! embedded from `knowledge/default.toml`; a replacement document can be
//! loaded at start-up with [`KnowledgeBase::from_file`]. All regular
//! expressions are compiled once, case-insensitively, when the
//! [`KnowledgeBase`] is built.

use crate::clause::ClauseType;
use crate::error::{KnowledgeError, KnowledgeResult};
use crate::risk::{RiskCategory, Severity};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::debug;

const DEFAULT_TABLES: &str = include_str!("../knowledge/default.toml");

/// Classification settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationSettings {
    /// Confidence reported for rule-based classifications.
    pub rule_confidence: f64,
    /// Zero-shot hypothesis template; `{}` is replaced by the label.
    pub hypothesis_template: String,
    /// Characters of clause text sent to the model.
    pub max_model_input_chars: usize,
    /// Segments must be longer than this (trimmed) to be classified.
    pub min_clause_chars: usize,
}

/// Descriptive entry for one risk category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInfo {
    pub id: RiskCategory,
    pub name: String,
    pub severity: Severity,
    pub description: String,
}

/// Sentiment scan settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentSettings {
    pub negative_label: String,
    pub threshold: f64,
    pub max_sentences: usize,
    pub min_sentence_chars: usize,
    pub indicators: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTables {
    version: String,
    classification: ClassificationSettings,
    clause_types: Vec<RawClauseType>,
    categories: Vec<CategoryInfo>,
    risk_rules: Vec<RawRiskRule>,
    clause_rules: Vec<RawClauseRule>,
    sentiment: SentimentSettings,
    summarization: RawSummarization,
}

#[derive(Debug, Deserialize)]
struct RawClauseType {
    label: String,
    patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawRiskRule {
    category: RiskCategory,
    confidence: f64,
    patterns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawClauseRule {
    clause_type: String,
    keywords: Vec<String>,
    category: RiskCategory,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct RawSummarization {
    stopwords: Vec<String>,
}

/// Keyword patterns for one clause type.
#[derive(Debug, Clone)]
pub struct ClausePatterns {
    pub clause_type: ClauseType,
    pub patterns: Vec<Regex>,
}

/// A compiled rule-based risk rule.
#[derive(Debug, Clone)]
pub struct RiskRule {
    pub category: RiskCategory,
    pub confidence: f64,
    pub patterns: Vec<Regex>,
}

/// A clause-type risk rule. Keywords are stored lower-cased.
#[derive(Debug, Clone)]
pub struct ClauseRule {
    pub clause_type: ClauseType,
    pub keywords: Vec<String>,
    pub category: RiskCategory,
    pub confidence: f64,
}

impl ClauseRule {
    /// True when the clause type matches and any keyword occurs in `text`.
    pub fn matches(&self, clause_type: ClauseType, text: &str) -> bool {
        if clause_type != self.clause_type {
            return false;
        }
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|kw| lowered.contains(kw.as_str()))
    }
}

/// Compiled knowledge tables shared by every pipeline stage.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    version: String,
    classification: ClassificationSettings,
    clause_patterns: Vec<ClausePatterns>,
    categories: BTreeMap<RiskCategory, CategoryInfo>,
    risk_rules: Vec<RiskRule>,
    clause_rules: Vec<ClauseRule>,
    sentiment: SentimentSettings,
    stopwords: HashSet<String>,
}

impl KnowledgeBase {
    /// Tables embedded in the crate.
    pub fn builtin() -> KnowledgeResult<Self> {
        Self::from_toml(DEFAULT_TABLES)
    }

    /// Load tables from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> KnowledgeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let kb = Self::from_toml(&content)?;
        debug!(
            path = %path.as_ref().display(),
            version = %kb.version,
            "Loaded knowledge tables from file"
        );
        Ok(kb)
    }

    /// Parse and compile a TOML document.
    pub fn from_toml(content: &str) -> KnowledgeResult<Self> {
        let raw: RawTables = toml::from_str(content)?;

        if raw.clause_types.is_empty() {
            return Err(KnowledgeError::NoClauseTypes);
        }

        let clause_patterns = raw
            .clause_types
            .into_iter()
            .map(|entry| {
                let clause_type: ClauseType = entry.label.parse()?;
                Ok(ClausePatterns {
                    clause_type,
                    patterns: compile_all(&entry.label, &entry.patterns)?,
                })
            })
            .collect::<KnowledgeResult<Vec<_>>>()?;

        let risk_rules = raw
            .risk_rules
            .into_iter()
            .map(|rule| {
                Ok(RiskRule {
                    patterns: compile_all(rule.category.as_str(), &rule.patterns)?,
                    category: rule.category,
                    confidence: rule.confidence,
                })
            })
            .collect::<KnowledgeResult<Vec<_>>>()?;

        let clause_rules = raw
            .clause_rules
            .into_iter()
            .map(|rule| {
                Ok(ClauseRule {
                    clause_type: rule.clause_type.parse()?,
                    keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    category: rule.category,
                    confidence: rule.confidence,
                })
            })
            .collect::<KnowledgeResult<Vec<_>>>()?;

        let categories = raw
            .categories
            .into_iter()
            .map(|info| (info.id, info))
            .collect();

        let stopwords = raw
            .summarization
            .stopwords
            .iter()
            .map(|w| w.to_lowercase())
            .collect();

        Ok(Self {
            version: raw.version,
            classification: raw.classification,
            clause_patterns,
            categories,
            risk_rules,
            clause_rules,
            sentiment: raw.sentiment,
            stopwords,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classification(&self) -> &ClassificationSettings {
        &self.classification
    }

    /// Clause patterns in table order.
    pub fn clause_patterns(&self) -> &[ClausePatterns] {
        &self.clause_patterns
    }

    /// Labels of the clause types in table order.
    pub fn clause_labels(&self) -> Vec<&'static str> {
        self.clause_patterns
            .iter()
            .map(|entry| entry.clause_type.label())
            .collect()
    }

    pub fn risk_rules(&self) -> &[RiskRule] {
        &self.risk_rules
    }

    pub fn clause_rules(&self) -> &[ClauseRule] {
        &self.clause_rules
    }

    pub fn sentiment(&self) -> &SentimentSettings {
        &self.sentiment
    }

    pub fn category(&self, category: RiskCategory) -> Option<&CategoryInfo> {
        self.categories.get(&category)
    }

    /// Severity of a category; categories missing from the table are medium.
    pub fn severity_for(&self, category: RiskCategory) -> Severity {
        self.categories
            .get(&category)
            .map(|info| info.severity)
            .unwrap_or(Severity::Medium)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

fn compile_all(owner: &str, patterns: &[String]) -> KnowledgeResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| KnowledgeError::InvalidPattern {
                    owner: owner.to_string(),
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_load() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.version(), "1.0.0");
        assert_eq!(kb.clause_patterns().len(), 15);
        assert_eq!(kb.clause_patterns()[0].clause_type, ClauseType::Termination);
        assert_eq!(kb.risk_rules().len(), 5);
        assert_eq!(kb.clause_rules().len(), 3);
        assert_eq!(kb.classification().max_model_input_chars, 500);
    }

    #[test]
    fn test_severity_table() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.severity_for(RiskCategory::AutoRenewal), Severity::High);
        assert_eq!(kb.severity_for(RiskCategory::PenaltyFees), Severity::Medium);
        assert_eq!(
            kb.severity_for(RiskCategory::ArbitrationRequirements),
            Severity::Low
        );
    }

    #[test]
    fn test_missing_category_defaults_to_medium() {
        let tables = DEFAULT_TABLES.replace("id = \"auto_renewal\"", "id = \"exclusive_terms\"");
        let kb = KnowledgeBase::from_toml(&tables).unwrap();
        assert!(kb.category(RiskCategory::AutoRenewal).is_none());
        assert_eq!(kb.severity_for(RiskCategory::AutoRenewal), Severity::Medium);
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let kb = KnowledgeBase::builtin().unwrap();
        let termination = &kb.clause_patterns()[0];
        assert!(termination.patterns[0].is_match("TERMINATION OF SERVICES"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let tables = DEFAULT_TABLES.replace(r"'\bperpetual\b'", r"'(unclosed'");
        let err = KnowledgeBase::from_toml(&tables).unwrap_err();
        match err {
            KnowledgeError::InvalidPattern { owner, pattern, .. } => {
                assert_eq!(owner, "auto_renewal");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_clause_label_is_rejected() {
        let tables = DEFAULT_TABLES.replace("label = \"Waiver\"", "label = \"Warranty\"");
        let err = KnowledgeBase::from_toml(&tables).unwrap_err();
        assert!(matches!(err, KnowledgeError::UnknownClauseType { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let err = KnowledgeBase::from_toml("version = ").unwrap_err();
        assert!(matches!(err, KnowledgeError::Parse(_)));
    }

    #[test]
    fn test_clause_rule_matching() {
        let kb = KnowledgeBase::builtin().unwrap();
        let liability = &kb.clause_rules()[0];
        assert!(liability.matches(ClauseType::Liability, "There is NO LIMIT to damages"));
        assert!(!liability.matches(ClauseType::Payment, "There is no limit to damages"));
        assert!(!liability.matches(ClauseType::Liability, "Liability is capped"));
    }
}
