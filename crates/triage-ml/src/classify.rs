//! Root-cause classification.
//!
//! The production model is trained offline; at serving time it is a linear
//! bag-of-words scorer over per-label token weights loaded from JSON.
//! Prediction is deterministic: labels are scored in model order and ties
//! keep the earlier label.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use triage_core::{TriageError, TriageResult};

/// Predicts a root-cause label for free-form incident text.
#[async_trait]
pub trait RootCauseClassifier: Send + Sync {
    async fn predict(&self, text: &str) -> TriageResult<String>;
}

/// Serialized classifier model.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierModel {
    /// Label returned when no token matches.
    pub fallback: String,
    /// Labels in scoring (and tie-break) order.
    pub labels: Vec<LabelWeights>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelWeights {
    pub label: String,
    pub tokens: HashMap<String, f32>,
}

/// Linear token-weight classifier.
pub struct KeywordClassifier {
    model: ClassifierModel,
}

impl KeywordClassifier {
    pub fn new(model: ClassifierModel) -> Self {
        Self { model }
    }

    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TriageError::Model(format!("{}: {}", path.display(), e)))?;
        let model: ClassifierModel = serde_json::from_str(&contents)
            .map_err(|e| TriageError::Model(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), labels = model.labels.len(), "Loaded classifier model");
        Ok(Self::new(model))
    }

    fn score(&self, tokens: &[String]) -> &str {
        let mut best: Option<(&str, f32)> = None;
        for label in &self.model.labels {
            let score: f32 = tokens
                .iter()
                .filter_map(|t| label.tokens.get(t))
                .sum();
            match best {
                // Strict greater-than keeps the earlier label on ties.
                Some((_, s)) if score <= s => {}
                _ if score > 0.0 => best = Some((&label.label, score)),
                _ => {}
            }
        }
        best.map(|(l, _)| l).unwrap_or(&self.model.fallback)
    }
}

#[async_trait]
impl RootCauseClassifier for KeywordClassifier {
    async fn predict(&self, text: &str) -> TriageResult<String> {
        Ok(self.score(&tokenize(text)).to_string())
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ClassifierModel {
        serde_json::from_str(
            r#"{
                "fallback": "unknown",
                "labels": [
                    {"label": "network", "tokens": {"timeout": 2.0, "connection": 1.0, "dns": 1.5}},
                    {"label": "storage", "tokens": {"disk": 2.0, "full": 1.0, "inode": 1.5}},
                    {"label": "security", "tokens": {"auth": 1.5, "token": 1.5, "expired": 1.0}}
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_predicts_highest_scoring_label() {
        let clf = KeywordClassifier::new(model());
        assert_eq!(clf.predict("Connection timeout to upstream").await.unwrap(), "network");
        assert_eq!(clf.predict("Disk is FULL on /var").await.unwrap(), "storage");
        assert_eq!(clf.predict("auth token expired").await.unwrap(), "security");
    }

    #[tokio::test]
    async fn test_prediction_is_deterministic() {
        let clf = KeywordClassifier::new(model());
        let a = clf.predict("dns timeout, token expired").await.unwrap();
        let b = clf.predict("dns timeout, token expired").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_tie_keeps_earlier_label() {
        // "timeout" scores network at 2.0, "disk" scores storage at 2.0.
        let clf = KeywordClassifier::new(model());
        assert_eq!(clf.predict("timeout while reading disk").await.unwrap(), "network");
    }

    #[tokio::test]
    async fn test_no_match_falls_back() {
        let clf = KeywordClassifier::new(model());
        assert_eq!(clf.predict("totally unrelated text").await.unwrap(), "unknown");
    }

    #[tokio::test]
    async fn test_empty_input_falls_back() {
        let clf = KeywordClassifier::new(model());
        assert_eq!(clf.predict("").await.unwrap(), "unknown");
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("Disk, full: /var!"), vec!["disk", "full", "var"]);
    }

    #[test]
    fn test_from_file_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(KeywordClassifier::from_file(&path), Err(TriageError::Model(_))));
    }
}
