use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::api::{error::ApiError, state::AppState};
use crate::domain::RetrievalResult;

const MAX_TOP_K: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    pub top_k: Option<usize>,
}

/// Raw ranked retrieval without generation.
pub async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<RetrievalResult>>, ApiError> {
    let Json(request) = payload?;

    let top_k = request
        .top_k
        .unwrap_or(state.config.config.rag.top_k)
        .min(MAX_TOP_K);
    let results = state
        .rag_service
        .retrieve_top_k(&request.query, top_k)
        .await?;

    Ok(Json(results))
}
