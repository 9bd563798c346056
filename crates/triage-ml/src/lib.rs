//! # Triage ML
//!
//! Embedding generation via Ollama, the in-memory similarity index,
//! incident retrieval, root-cause classification and log summarization.

pub mod classify;
pub mod index;
pub mod ollama;
pub mod provider;
pub mod retrieval;
pub mod summarize;

pub use classify::{ClassifierModel, KeywordClassifier, RootCauseClassifier};
pub use index::SimilarityIndex;
pub use ollama::OllamaClient;
pub use provider::{EmbeddingProvider, OllamaEmbedder};
pub use retrieval::{RetrievalService, SimilarIncident, DEFAULT_TOP_K};
pub use summarize::{OllamaSummarizer, Summarizer};
