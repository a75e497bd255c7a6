use std::sync::Arc;
use tracing::instrument;

use crate::application::RagService;
use crate::domain::{
    build_context,
    ports::{GenerationRequest, LlmService},
    ChatAnswer, ChatQuery, DomainError, Pathway, DEFAULT_SIMILARITY_THRESHOLD, KB_REFUSAL,
};
use crate::infrastructure::config::{PathwayPrompt, PromptsConfig};

/// Routes each question to one of the three answer pathways.
pub struct ChatService {
    rag: Arc<RagService>,
    llm: Arc<dyn LlmService>,
    prompts: PromptsConfig,
    threshold: f64,
}

impl ChatService {
    pub fn new(rag: Arc<RagService>, llm: Arc<dyn LlmService>, prompts: PromptsConfig) -> Self {
        Self {
            rag,
            llm,
            prompts,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Answers `query.message`. `query.history` is not consulted.
    #[instrument(skip(self, query), fields(enable_llm = query.enable_llm))]
    pub async fn answer(&self, query: &ChatQuery) -> Result<ChatAnswer, DomainError> {
        if query.message.trim().is_empty() {
            return Err(DomainError::validation("Message is required"));
        }
        tracing::debug!(history_len = query.history.len(), "processing query");

        let results = self.rag.retrieve(&query.message).await?;
        let top_similarity = results.first().map(|r| r.similarity).unwrap_or(0.0);
        let context = build_context(&results);

        let pathway = Pathway::select(query.enable_llm, top_similarity, self.threshold);
        tracing::info!(
            retrieved = results.len(),
            top_similarity,
            pathway = %pathway,
            "selected pathway"
        );

        let request = match pathway {
            Pathway::KbOnly => generation_request(&self.prompts.kb_only, &context, &query.message),
            Pathway::KbAugmented => {
                generation_request(&self.prompts.kb_augmented, &context, &query.message)
            }
            Pathway::LlmFallback => {
                generation_request(&self.prompts.llm_fallback, "", &query.message)
            }
        };

        let answer = self.llm.complete(&request).await?;
        let answer = match pathway {
            Pathway::KbOnly => canonicalize_refusal(answer),
            _ => answer,
        };

        Ok(ChatAnswer::new(answer, pathway))
    }
}

fn generation_request(prompt: &PathwayPrompt, context: &str, question: &str) -> GenerationRequest {
    let request = GenerationRequest::new(&prompt.system, prompt.render_user(context, question));
    match prompt.temperature {
        Some(temperature) => request.with_temperature(temperature),
        None => request,
    }
}

/// Collapses any refusal-like answer to the single canonical sentence.
pub fn canonicalize_refusal(answer: String) -> String {
    let lower = answer.to_lowercase();
    if lower.contains("don't know") || lower.contains("cannot answer") {
        KB_REFUSAL.to_string()
    } else {
        answer
    }
}
