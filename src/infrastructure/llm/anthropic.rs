use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::anthropic;

use crate::domain::{
    ports::{GenerationRequest, LlmService},
    DomainError,
};

/// Anthropic requires an explicit completion budget.
const MAX_TOKENS: u64 = 1024;

pub struct AnthropicLlm {
    client: anthropic::Client,
    model: String,
}

impl AnthropicLlm {
    pub fn new(client: anthropic::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Reads `ANTHROPIC_API_KEY` from the environment.
    pub fn from_env(model: impl Into<String>) -> Self {
        Self::new(anthropic::Client::from_env(), model)
    }
}

#[async_trait]
impl LlmService for AnthropicLlm {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        let mut builder = self
            .client
            .agent(&self.model)
            .preamble(&request.system)
            .max_tokens(MAX_TOKENS);
        if let Some(temperature) = request.temperature {
            builder = builder.temperature(temperature);
        }
        let agent = builder.build();

        agent
            .prompt(request.prompt.as_str())
            .await
            .map_err(|e| DomainError::generation(e.to_string()))
    }
}
