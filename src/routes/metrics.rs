//! Prometheus scrape endpoint.

use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::error::AppError;
use crate::metrics::EXPOSITION_CONTENT_TYPE;
use crate::state::AppState;

/// Render all collectors in the text exposition format.
///
/// Reads in-memory collectors only; a scrape never does I/O.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.metrics.render()?;
    Ok(([(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body))
}
