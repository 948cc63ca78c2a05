//! HTTP route handlers.
//!
//! Three endpoints: `/analyze` for name analysis, `/health` for orchestrator
//! probes and `/metrics` for Prometheus scrapes. Unknown paths fall back to a
//! JSON 404.
//!
//! Request tracing and metrics are recorded by the outermost middleware, which
//! generates a unique request ID for each incoming request.

pub mod analyze;
pub mod health;
pub mod metrics;

use std::any::Any;

use axum::{middleware, response::IntoResponse, response::Response, routing::get, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::error::AppError;
use crate::middleware::{request_layer, tag_matched_route};
use crate::state::AppState;

/// Turn a handler panic into a logged 500 response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Fallback for unknown routes.
async fn not_found() -> AppError {
    AppError::NotFound
}

/// Creates the Axum router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Health check - never cached, probes must reach the process
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    let api_routes = Router::new()
        .route("/analyze", get(analyze::analyze))
        .route("/metrics", get(metrics::metrics));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        // Panics become 500s inside the route tag so they keep their route label
        .route_layer(CatchPanicLayer::custom(handle_panic))
        .route_layer(middleware::from_fn(tag_matched_route))
        .fallback(not_found)
        .with_state(state.clone())
        // Request layer - root span with request_id, latency and request counters
        .layer(middleware::from_fn_with_state(state, request_layer))
}
