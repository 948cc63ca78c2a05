//! Name analysis endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::instrument;

use crate::analyzer::{self, NameMetrics};
use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for `GET /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub name: Option<String>,
}

/// Analyze the `name` query parameter and return its metrics as JSON.
///
/// Missing, empty or oversized names are rejected with 400.
#[instrument(name = "analyze::analyze", skip(state, params))]
pub async fn analyze(
    State(state): State<AppState>,
    params: Result<Query<AnalyzeParams>, QueryRejection>,
) -> Result<Json<NameMetrics>, AppError> {
    let result = params
        .map_err(AppError::from)
        .and_then(|Query(params)| params.name.ok_or(AppError::MissingParameter("name")))
        .and_then(|name| {
            analyzer::analyze(&name, state.max_name_length()).map_err(AppError::from)
        });

    let metrics = match result {
        Ok(metrics) => metrics,
        Err(err) => {
            tracing::warn!(event = "analyze_rejected", reason = %err, "Rejected analyze request");
            return Err(err);
        }
    };

    state.metrics.observe_name_length(metrics.length);
    tracing::debug!(event = "name_received", analyzed_name = %metrics.name, "Analyzed name");
    tracing::info!(
        event = "name_analyzed",
        length = metrics.length,
        vowel_count = metrics.vowel_count,
        consonant_count = metrics.consonant_count,
        complexity = metrics.complexity,
        "Name analyzed"
    );

    Ok(Json(metrics))
}
