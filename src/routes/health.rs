//! Health check endpoint for container orchestration.
//!
//! Returns 200 whenever the process can answer HTTP. The same endpoint serves
//! both readiness and liveness probes; no downstream dependencies are checked.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
