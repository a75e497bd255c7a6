use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, VectorIndex},
    DomainError, RetrievalResult,
};

pub struct RagService {
    embedding: Arc<dyn EmbeddingService>,
    index: Arc<dyn VectorIndex>,
    default_top_k: usize,
}

impl RagService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        index: Arc<dyn VectorIndex>,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedding,
            index,
            default_top_k,
        }
    }

    pub fn indexed_chunks(&self) -> usize {
        self.index.len()
    }

    #[instrument(skip(self, query))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievalResult>, DomainError> {
        self.retrieve_top_k(query, self.default_top_k).await
    }

    /// Embeds `query` and returns its `top_k` nearest chunks, unfiltered.
    #[instrument(skip(self, query))]
    pub async fn retrieve_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::validation("Message is required"));
        }

        let embedding = self.embedding.embed(query).await?;
        let results = self.index.retrieve_top_k(&embedding, top_k).await?;
        tracing::debug!(count = results.len(), "retrieved chunks");
        Ok(results)
    }
}
