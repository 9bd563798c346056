//! Similar-incident retrieval.
//!
//! Embeds a free-text query with the same provider the index was built
//! with, then projects index hits into the public result shape (distances
//! stay internal).

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use triage_core::{IncidentRecord, TriageError, TriageResult};

use crate::index::SimilarityIndex;
use crate::provider::EmbeddingProvider;

/// Default number of similar incidents returned.
pub const DEFAULT_TOP_K: usize = 3;

/// One retrieval hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimilarIncident {
    pub log_text: String,
    pub root_cause: String,
}

impl From<&IncidentRecord> for SimilarIncident {
    fn from(record: &IncidentRecord) -> Self {
        Self {
            log_text: record.log_text.clone(),
            root_cause: record.root_cause.clone(),
        }
    }
}

/// Read-only retrieval front-end over the similarity index. Safe to share
/// across tasks; queries never mutate.
pub struct RetrievalService {
    provider: Arc<dyn EmbeddingProvider>,
    index: SimilarityIndex,
}

impl RetrievalService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, index: SimilarityIndex) -> Self {
        Self { provider, index }
    }

    /// Embed the corpus and build the service in one step.
    pub async fn build(
        provider: Arc<dyn EmbeddingProvider>,
        records: Vec<IncidentRecord>,
    ) -> TriageResult<Self> {
        let index = SimilarityIndex::build(provider.as_ref(), records).await?;
        Ok(Self::new(provider, index))
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Top-k incidents most similar to `query_text`.
    ///
    /// An empty (after trimming) query is an embedding error, not an empty
    /// result: callers must be able to tell "invalid query" from "empty
    /// index". An empty index returns an empty list for any valid query.
    pub async fn find_similar(&self, query_text: &str, k: usize) -> TriageResult<Vec<SimilarIncident>> {
        if query_text.trim().is_empty() {
            return Err(TriageError::embedding("query text is empty"));
        }
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.provider.embed(query_text).await?;
        debug!(dim = query_vector.len(), k, "Embedded retrieval query");

        let hits = self.index.query(&query_vector, k)?;
        Ok(hits.into_iter().map(|(record, _)| record.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Maps texts to crude lexical-overlap vectors so similarity follows
    /// shared words, mimicking a real embedding space.
    struct LexicalStub;

    const VOCAB: [&str; 6] = ["login", "timeout", "disk", "full", "auth", "token"];

    #[async_trait]
    impl EmbeddingProvider for LexicalStub {
        async fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
            if text.trim().is_empty() {
                return Err(TriageError::embedding("cannot embed empty text"));
            }
            let lower = text.to_lowercase();
            Ok(VOCAB
                .iter()
                .map(|w| if lower.contains(w) { 1.0 } else { 0.0 })
                .collect())
        }
    }

    fn corpus() -> Vec<IncidentRecord> {
        vec![
            IncidentRecord::new("login timeout", "network"),
            IncidentRecord::new("disk full", "storage"),
            IncidentRecord::new("auth token expired", "security"),
        ]
    }

    async fn service() -> RetrievalService {
        RetrievalService::build(Arc::new(LexicalStub), corpus()).await.unwrap()
    }

    #[tokio::test]
    async fn test_lexically_closest_incident_ranks_first() {
        let service = service().await;
        let results = service.find_similar("token expired during auth", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].log_text, "auth token expired");
        assert_eq!(results[0].root_cause, "security");
    }

    #[tokio::test]
    async fn test_default_k_returns_all_three() {
        let service = service().await;
        let results = service.find_similar("disk almost full", DEFAULT_TOP_K).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].root_cause, "storage");
    }

    #[tokio::test]
    async fn test_empty_query_is_an_embedding_error() {
        let service = service().await;
        let err = service.find_similar("   ", 3).await.unwrap_err();
        assert!(matches!(err, TriageError::Embedding(_)));
    }

    #[tokio::test]
    async fn test_empty_index_returns_empty_list() {
        let service = RetrievalService::new(Arc::new(LexicalStub), SimilarityIndex::empty());
        let results = service.find_similar("anything at all", 3).await.unwrap();
        assert!(results.is_empty());
    }
}
