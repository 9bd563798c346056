//! One-shot summarization.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Summarizer failures come back as tagged text inside a 200 response, the
/// same way stream batches report them.
pub async fn summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    let summary = state.summarizer.summarize(&req.text).await;
    Json(SummarizeResponse { summary })
}
