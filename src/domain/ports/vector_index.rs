use crate::domain::{errors::DomainError, Embedding, RetrievalResult};
use async_trait::async_trait;

/// Read-only nearest-neighbour lookup over an index snapshot.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// At most `top_k` results, descending by similarity, ties by ascending index.
    /// No similarity floor is applied.
    async fn retrieve_top_k(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievalResult>, DomainError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
