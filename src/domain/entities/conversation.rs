use serde::{Deserialize, Serialize};

/// One prior turn of a chat as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single question routed through the pipeline.
///
/// `history` is accepted from clients but not consumed: retrieval and routing
/// only ever look at `message`.
#[derive(Debug, Clone)]
pub struct ChatQuery {
    pub message: String,
    pub history: Vec<ChatMessage>,
    pub enable_llm: bool,
}

impl ChatQuery {
    pub fn new(message: impl Into<String>, enable_llm: bool) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            enable_llm,
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}
