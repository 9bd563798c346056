//! Ollama HTTP client for embedding and text generation.
//!
//! Uses /api/embeddings for vectors and /api/generate for summaries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use triage_core::{TriageError, TriageResult};

/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default embedding model.
pub const DEFAULT_EMBED_MODEL: &str = "nomic-embed-text";

/// Ollama client shared by the embedding provider and the summarizer.
#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client with the default localhost URL.
    pub fn default_client() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }

    /// Generate an embedding vector for the given text.
    pub async fn embed(&self, model: &str, text: &str) -> TriageResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(TriageError::embedding("cannot embed empty text"));
        }

        let request = EmbeddingRequest {
            model: model.to_string(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::embedding(format!("failed to connect to Ollama: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::embedding(format!("Ollama API error ({status}): {body}")));
        }

        let result: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| TriageError::embedding(format!("failed to parse Ollama response: {e}")))?;

        debug!(dim = result.embedding.len(), "Generated embedding");

        Ok(result.embedding)
    }

    /// Run a single non-streaming generation and return the full response text.
    pub async fn generate(&self, model: &str, prompt: &str) -> TriageResult<String> {
        let request = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::Model(format!("failed to connect to Ollama: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TriageError::Model(format!("Ollama API error ({status}): {body}")));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TriageError::Model(format!("failed to parse Ollama response: {e}")))?;

        Ok(result.response)
    }

    /// Check if the Ollama service is reachable and the model is available.
    pub async fn health_check(&self, model: &str) -> TriageResult<bool> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                let text = resp.text().await.unwrap_or_default();
                Ok(text.contains(model))
            }
            _ => Ok(false),
        }
    }
}
