use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, Result};
use crate::domain::{Chunk, Embedding};

/// One persisted chunk together with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub text: String,
    pub embedding: Embedding,
    pub index: usize,
}

impl EmbeddingRecord {
    pub fn new(chunk: Chunk, embedding: Embedding) -> Self {
        Self {
            text: chunk.text,
            embedding,
            index: chunk.index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub total_chunks: usize,
}

/// The full set of embedded chunks produced by one ingestion run.
///
/// Snapshots are rebuilt wholesale; nothing mutates one after it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub chunks: Vec<EmbeddingRecord>,
    pub metadata: SnapshotMetadata,
}

impl IndexSnapshot {
    pub fn new(model: impl Into<String>, chunks: Vec<EmbeddingRecord>) -> Self {
        let total_chunks = chunks.len();
        Self {
            chunks,
            metadata: SnapshotMetadata {
                model: model.into(),
                created_at: Utc::now(),
                total_chunks,
            },
        }
    }

    pub fn empty(model: impl Into<String>) -> Self {
        Self::new(model, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Shared embedding dimension, or `None` for an empty snapshot.
    pub fn dimension(&self) -> Option<usize> {
        self.chunks.first().map(|r| r.embedding.dimension())
    }

    /// Rejects snapshots whose records disagree on embedding dimension.
    pub fn validate(&self) -> Result<()> {
        let Some(expected) = self.dimension() else {
            return Ok(());
        };

        if let Some(bad) = self
            .chunks
            .iter()
            .find(|r| r.embedding.dimension() != expected)
        {
            return Err(DomainError::dimension_mismatch(
                expected,
                bad.embedding.dimension(),
            ));
        }

        if expected == 0 {
            return Err(DomainError::snapshot("snapshot embeddings are empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, index: usize, vector: Vec<f32>) -> EmbeddingRecord {
        EmbeddingRecord::new(Chunk::new(text, index), Embedding::new(vector))
    }

    #[test]
    fn test_new_counts_chunks() {
        let snapshot = IndexSnapshot::new(
            "text-embedding-3-small",
            vec![record("a", 0, vec![1.0, 0.0]), record("b", 1, vec![0.0, 1.0])],
        );

        assert_eq!(snapshot.metadata.total_chunks, 2);
        assert_eq!(snapshot.dimension(), Some(2));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        let snapshot = IndexSnapshot::empty("m");
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.dimension(), None);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_mixed_dimensions_rejected() {
        let snapshot = IndexSnapshot::new(
            "m",
            vec![record("a", 0, vec![1.0, 0.0]), record("b", 1, vec![1.0])],
        );

        let err = snapshot.validate().unwrap_err();
        assert!(matches!(
            err,
            DomainError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_serialized_shape() {
        let snapshot = IndexSnapshot::new("m", vec![record("TechCorp", 0, vec![0.5, 0.25])]);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["chunks"][0]["text"], "TechCorp");
        assert_eq!(json["chunks"][0]["embedding"][1], 0.25);
        assert_eq!(json["chunks"][0]["index"], 0);
        assert_eq!(json["metadata"]["model"], "m");
        assert_eq!(json["metadata"]["total_chunks"], 1);
        assert!(json["metadata"]["created_at"].is_string());
    }
}
