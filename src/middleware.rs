//! Request middleware: request IDs, request spans and metric recording.
//!
//! Generates a UUID v4 for each incoming request and creates a tracing span
//! that wraps the entire request lifecycle. All logs emitted during request
//! processing include the request_id field for correlation. On completion the
//! request is counted and timed in the metrics registry.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::UNMATCHED_ROUTE_LABEL;
use crate::state::AppState;

/// Response header echoing the generated request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Route template that handled a request, carried on the response.
///
/// Routing happens inside the outer middleware, so the matched path is passed
/// back out through response extensions by [`tag_matched_route`].
#[derive(Clone, Debug)]
pub struct MatchedRoute(pub String);

/// Route-level middleware that records the matched route template on the
/// response so [`request_layer`] can label metrics without using raw paths.
pub async fn tag_matched_route(request: Request, next: Next) -> Response {
    let matched = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string());

    let mut response = next.run(request).await;
    if let Some(route) = matched {
        response.extensions_mut().insert(MatchedRoute(route));
    }
    response
}

/// Middleware that generates a request ID, creates a request span and records
/// request metrics.
///
/// This should be the outermost middleware layer so the span and the latency
/// measurement wrap all request processing, including unmatched routes.
pub async fn request_layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let _in_flight = state.metrics.track_in_flight();
        let mut response = next.run(request).await;
        let elapsed = start.elapsed();
        let duration_ms = elapsed.as_millis() as u64;

        let route = response
            .extensions()
            .get::<MatchedRoute>()
            .map(|r| r.0.as_str())
            .unwrap_or(UNMATCHED_ROUTE_LABEL);
        let status = response.status();
        state
            .metrics
            .observe_request(&method, route, status, elapsed);

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            event = "request_completed",
            route,
            status = status.as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}
