use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::api::{error::ApiError, state::AppState};
use crate::domain::{ChatAnswer, ChatMessage, ChatQuery};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Accepted for client compatibility; not used for retrieval or routing.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default, rename = "enableLLM", alias = "enable_llm")]
    pub enable_llm: bool,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatAnswer>, ApiError> {
    let Json(request) = payload?;

    let query = ChatQuery::new(request.message, request.enable_llm).with_history(request.history);
    let answer = state.chat_service.answer(&query).await?;

    Ok(Json(answer))
}
