use crate::domain::{errors::DomainError, Embedding};
use async_trait::async_trait;

/// External embedding model.
///
/// Implementations never retry and never substitute a placeholder vector;
/// upstream failures surface as [`DomainError::EmbeddingService`].
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError>;
    /// Output is index-aligned with `texts`.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError>;
    fn model(&self) -> &str;
}
