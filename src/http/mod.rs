//! HTTP server module.
//!
//! Binds the configured address over plain HTTP (TLS is terminated by the
//! ingress in front of the service) and shuts down gracefully on
//! SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
