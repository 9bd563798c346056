//! Similar-incident search.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use triage_core::TriageError;
use triage_ml::{SimilarIncident, DEFAULT_TOP_K};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchRequest {
    pub log_text: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub similar_incidents: Vec<SimilarIncident>,
}

pub async fn search_similar(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let similar_incidents = state
        .retrieval
        .find_similar(&req.log_text, DEFAULT_TOP_K)
        .await
        .map_err(|e| match e {
            TriageError::Embedding(_) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(SearchResponse { similar_incidents }))
}
