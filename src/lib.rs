//! nameprobe - name analysis microservice
//!
//! Exposes `GET /analyze` over a pure name-analysis function, together with a
//! health probe, Prometheus metrics and structured request logging.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use analyzer::{analyze, AnalyzeError, NameMetrics};
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
