//! Root-cause prediction and incident history.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use triage_core::{HistoryRow, IncidentReport};

use crate::state::AppState;

#[derive(Serialize)]
pub struct PredictResponse {
    pub predicted_root_cause: String,
}

/// Predict a root cause and append the incident to the history log. The
/// persisted timestamp is server-assigned; the reported one only feeds the
/// classifier input.
pub async fn predict(
    State(state): State<AppState>,
    Json(report): Json<IncidentReport>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    let predicted = state
        .classifier
        .predict(&report.combined_input())
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let row = HistoryRow {
        timestamp: chrono::Utc::now().to_rfc3339(),
        component: report.component.clone(),
        severity: report.severity.clone(),
        log_text: report.log_text.clone(),
        predicted_root_cause: predicted.clone(),
    };
    state
        .history
        .append(&row)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(PredictResponse {
        predicted_root_cause: predicted,
    }))
}

pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRow>>, (StatusCode, String)> {
    let rows = state
        .history
        .load()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(rows))
}
