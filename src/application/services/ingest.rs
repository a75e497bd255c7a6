use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    chunk_text, clean_text,
    ports::{EmbeddingService, SnapshotStore},
    DomainError, EmbeddingRecord, IndexSnapshot,
};

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub clean_markdown: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            chunk_size: 600,
            chunk_overlap: 100,
            clean_markdown: false,
        }
    }
}

/// Rebuilds the index snapshot from a source document.
pub struct IngestService {
    embedding: Arc<dyn EmbeddingService>,
    store: Arc<dyn SnapshotStore>,
    options: IngestOptions,
}

impl IngestService {
    pub fn new(embedding: Arc<dyn EmbeddingService>, store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_options(embedding, store, IngestOptions::default())
    }

    pub fn with_options(
        embedding: Arc<dyn EmbeddingService>,
        store: Arc<dyn SnapshotStore>,
        options: IngestOptions,
    ) -> Self {
        Self {
            embedding,
            store,
            options,
        }
    }

    /// Chunks and embeds `content`, then replaces the stored snapshot.
    ///
    /// Nothing is written if any step fails.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn ingest(&self, content: &str) -> Result<IndexSnapshot, DomainError> {
        let snapshot = self.build_snapshot(content).await?;
        self.store.save(&snapshot).await?;
        tracing::info!(total_chunks = snapshot.len(), "snapshot saved");
        Ok(snapshot)
    }

    async fn build_snapshot(&self, content: &str) -> Result<IndexSnapshot, DomainError> {
        let cleaned;
        let source = if self.options.clean_markdown {
            cleaned = clean_text(content);
            cleaned.as_str()
        } else {
            content
        };

        let chunks = chunk_text(source, self.options.chunk_size, self.options.chunk_overlap);
        tracing::info!(count = chunks.len(), "chunked document");

        let model = self.embedding.model().to_string();
        if chunks.is_empty() {
            return Ok(IndexSnapshot::empty(model));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(DomainError::embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }
        tracing::info!(count = embeddings.len(), "generated embeddings");

        let records = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| EmbeddingRecord::new(chunk, embedding))
            .collect();

        let snapshot = IndexSnapshot::new(model, records);
        snapshot.validate()?;
        Ok(snapshot)
    }
}
