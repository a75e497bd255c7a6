use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::openai;

use crate::domain::{
    ports::{GenerationRequest, LlmService},
    DomainError,
};

pub struct OpenAiLlm {
    client: openai::Client,
    model: String,
}

impl OpenAiLlm {
    pub fn new(client: openai::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Reads `OPENAI_API_KEY` from the environment.
    pub fn from_env(model: impl Into<String>) -> Self {
        Self::new(openai::Client::from_env(), model)
    }
}

#[async_trait]
impl LlmService for OpenAiLlm {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, DomainError> {
        let mut builder = self.client.agent(&self.model).preamble(&request.system);
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
