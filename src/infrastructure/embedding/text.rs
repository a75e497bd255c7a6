use async_trait::async_trait;
use std::collections::HashMap;
use rig::client::{EmbeddingsClient, ProviderClient};
use rig::embeddings::EmbeddingsBuilder;
use rig::providers::openai;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

/// OpenAI embeddings through rig.
///
/// The provider client is built once and reused for every call.
pub struct TextEmbedding {
    client: openai::Client,
    model: String,
}

impl TextEmbedding {
    pub fn new(client: openai::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Reads `OPENAI_API_KEY` from the environment.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(openai::Client::from_env(), config.model.clone())
    }
}

#[async_trait]
impl EmbeddingService for TextEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        let mut embeddings = self.embed_batch(&[text]).await?;
        embeddings
            .pop()
            .ok_or_else(|| DomainError::embedding("No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.client.embedding_model(&self.model);

        let mut builder = EmbeddingsBuilder::new(model);
        for text in texts {
            builder = builder
                .document(text.to_string())
                .map_err(|e| DomainError::embedding(e.to_string()))?;
        }

        let embeddings = builder
            .build()
            .await
            .map_err(|e| DomainError::embedding(e.to_string()))?;

        // Batches may complete out of order; realign by document text.
        let by_text: HashMap<String, Vec<f32>> = embeddings
            .into_iter()
            .map(|(doc, emb)| {
                let vec_f32: Vec<f32> = emb.first().vec.into_iter().map(|x| x as f32).collect();
                (doc, vec_f32)
            })
            .collect();

        texts
            .iter()
            .map(|text| {
                by_text
                    .get(*text)
                    .cloned()
                    .map(Embedding::new)
                    .ok_or_else(|| DomainError::embedding("Embedding missing for input text"))
            })
            .collect()
    }

    fn model(&self) -> &str {
        &self.model
    }
}
