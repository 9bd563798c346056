//! In-memory similarity index over historical incidents.
//!
//! Exhaustive squared-L2 nearest-neighbor search. The corpus is small
//! enough that a linear scan beats maintaining an approximate structure,
//! and exact search keeps results deterministic. Built once at startup,
//! immutable afterwards, so concurrent readers need no lock.

use tracing::info;

use triage_core::{IncidentRecord, TriageError, TriageResult};

use crate::provider::EmbeddingProvider;

/// Vectors plus positionally-aligned incident metadata: the record at
/// position i owns the vector at position i.
#[derive(Debug)]
pub struct SimilarityIndex {
    vectors: Vec<Vec<f32>>,
    records: Vec<IncidentRecord>,
    dim: usize,
}

impl SimilarityIndex {
    /// Embed every record and build the index.
    ///
    /// Any record failing to embed (including one whose `log_text` trims to
    /// empty) aborts the whole build; skipping records would desync vectors
    /// from metadata.
    pub async fn build(
        provider: &dyn EmbeddingProvider,
        records: Vec<IncidentRecord>,
    ) -> TriageResult<Self> {
        let mut vectors = Vec::with_capacity(records.len());
        let mut dim = 0;

        for (i, record) in records.iter().enumerate() {
            if record.log_text.trim().is_empty() {
                return Err(TriageError::embedding(format!("record {i} has empty log_text")));
            }
            let vector = provider.embed(&record.log_text).await?;
            if dim == 0 {
                dim = vector.len();
            } else if vector.len() != dim {
                return Err(TriageError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            vectors.push(vector);
        }

        info!(count = records.len(), dim, "Built similarity index");

        Ok(Self { vectors, records, dim })
    }

    /// Build an index with no records.
    pub fn empty() -> Self {
        Self {
            vectors: Vec::new(),
            records: Vec::new(),
            dim: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimension, 0 while the index is empty.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the k nearest records to `vector` by squared L2 distance,
    /// ascending, ties broken by insertion order. `k` larger than the index
    /// saturates to the full index.
    pub fn query(&self, vector: &[f32], k: usize) -> TriageResult<Vec<(&IncidentRecord, f32)>> {
        if k == 0 {
            return Err(TriageError::Validation("k must be at least 1".to_string()));
        }
        if self.records.is_empty() {
            return Ok(Vec::new());
        }
        if vector.len() != self.dim {
            return Err(TriageError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .map(|v| squared_l2(vector, v))
            .enumerate()
            .collect();

        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k.min(self.records.len()));

        Ok(scored
            .into_iter()
            .map(|(i, d)| (&self.records[i], d))
            .collect())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
