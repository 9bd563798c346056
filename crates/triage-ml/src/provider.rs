//! Embedding provider seam.
//!
//! The index and retrieval service only see this trait, so tests can swap
//! in hand-crafted vectors and the embedding backend stays replaceable.

use async_trait::async_trait;

use triage_core::TriageResult;

use crate::ollama::OllamaClient;

/// Converts text into a fixed-dimension dense vector.
///
/// The same provider instance (and model) used to build the index must be
/// used for queries; mixing embedding spaces silently breaks retrieval.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> TriageResult<Vec<f32>>;
}

/// Ollama-backed provider bound to a fixed embedding model.
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: OllamaClient,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
        self.client.embed(&self.model, text).await
    }
}
