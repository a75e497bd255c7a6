mod anthropic;
mod openai;

use std::sync::Arc;

use crate::domain::ports::LlmService;
use crate::infrastructure::config::{LlmConfig, LlmProvider};

pub use anthropic::AnthropicLlm;
pub use openai::OpenAiLlm;

/// Builds the configured completion backend.
pub fn from_config(config: &LlmConfig) -> Arc<dyn LlmService> {
    match config.provider {
        LlmProvider::OpenAi => Arc::new(OpenAiLlm::from_env(&config.model)),
        LlmProvider::Anthropic => Arc::new(AnthropicLlm::from_env(&config.model)),
    }
}
