//! Port doubles shared by unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::AppState;
use crate::application::{ChatService, RagService};
use crate::domain::{
    ports::{EmbeddingService, GenerationRequest, LlmService},
    Chunk, DomainError, Embedding, EmbeddingRecord, IndexSnapshot,
};
use crate::infrastructure::{AppConfig, InMemoryIndex};

/// Returns a fixed vector per known text and `fallback` for anything else.
pub struct FakeEmbedding {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    fail: bool,
    calls: Mutex<usize>,
}

impl FakeEmbedding {
    pub fn new(fallback: Vec<f32>) -> Self {
        Self {
            vectors: HashMap::new(),
            fallback,
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn lookup(&self, text: &str) -> Embedding {
        Embedding::new(
            self.vectors
                .get(text)
                .cloned()
                .unwrap_or_else(|| self.fallback.clone()),
        )
    }
}

#[async_trait]
impl EmbeddingService for FakeEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(DomainError::embedding("upstream unavailable"));
        }
        Ok(self.lookup(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(DomainError::embedding("upstream unavailable"));
        }
        Ok(texts.iter().map(|t| self.lookup(t)).collect())
    }

    fn model(&self) -> &str {
        "fake-embedding"
    }
}

/// Replies with a canned answer and records every request.
pub struct FakeLlm {
    reply: Result<String, String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeLlm {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for FakeLlm {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(DomainError::generation)
    }
}

/// One-chunk knowledge base: "TechCorp offers consulting." at `[1, 0]`.
pub fn techcorp_snapshot() -> IndexSnapshot {
    IndexSnapshot::new(
        "fake-embedding",
        vec![EmbeddingRecord::new(
            Chunk::new("TechCorp offers consulting.", 0),
            Embedding::new(vec![1.0, 0.0]),
        )],
    )
}

/// Full API state wired to in-process doubles.
pub fn app_state(snapshot: IndexSnapshot, embedding: FakeEmbedding, llm: Arc<FakeLlm>) -> AppState {
    let config = AppConfig::default();
    let metadata = snapshot.metadata.clone();
    let index = Arc::new(InMemoryIndex::from_snapshot(snapshot).expect("valid test snapshot"));
    let rag = Arc::new(RagService::new(
        Arc::new(embedding),
        index,
        config.config.rag.top_k,
    ));
    let chat = Arc::new(
        ChatService::new(rag.clone(), llm, config.prompts.clone())
            .with_threshold(config.config.rag.threshold),
    );
    AppState::new(chat, rag, metadata, config)
}
