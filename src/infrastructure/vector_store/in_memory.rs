use async_trait::async_trait;
use std::cmp::Ordering;

use crate::domain::{
    ports::VectorIndex, DomainError, Embedding, EmbeddingRecord, IndexSnapshot, RetrievalResult,
};

/// Brute-force cosine index over a fully loaded snapshot.
///
/// Immutable once built, so it can be shared across requests behind an `Arc`.
pub struct InMemoryIndex {
    records: Vec<EmbeddingRecord>,
    dimension: Option<usize>,
}

impl InMemoryIndex {
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self, DomainError> {
        snapshot.validate()?;
        let dimension = snapshot.dimension();
        Ok(Self {
            records: snapshot.chunks,
            dimension,
        })
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn retrieve_top_k(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, DomainError> {
        let Some(dimension) = self.dimension else {
            return Ok(Vec::new());
        };
        if query.dimension() != dimension {
            return Err(DomainError::dimension_mismatch(dimension, query.dimension()));
        }

        let mut results = self
            .records
            .iter()
            .map(|record| {
                Ok(RetrievalResult {
                    text: record.text.clone(),
                    similarity: query.cosine_similarity(&record.embedding)?,
                    index: record.index,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        results.truncate(top_k);

        Ok(results)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
