//! nameprobe: a name analysis microservice.
//!
//! This is the application entry point. It loads configuration from TOML and
//! the environment, initializes tracing, builds the metrics registry and the
//! Axum router, and runs the HTTP server until a shutdown signal arrives.

use std::path::Path;

use clap::Parser;

use nameprobe::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use nameprobe::http::start_server;
use nameprobe::logging::init_tracing;
use nameprobe::{create_router, AppState};

/// nameprobe: name analysis with health checks and Prometheus metrics
#[derive(Parser, Debug)]
#[command(name = "nameprobe", version, about)]
struct Args {
    /// Path to configuration file (defaults apply if omitted and config/default.toml is absent)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "nameprobe=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

/// Load the config file, falling back to built-in defaults when no path was
/// given and the default file does not exist.
fn load_config(path: Option<&str>) -> Result<AppConfig, nameprobe::config::ConfigError> {
    let mut config = match path {
        Some(path) => AppConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => AppConfig::load(DEFAULT_CONFIG_PATH)?,
        None => AppConfig::default(),
    };
    config.apply_env()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Configuration comes first so its log format can shape the subscriber
    let config = load_config(args.config.as_deref())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format);

    tracing::info!(
        event = "startup",
        host = %config.http.host,
        port = config.http.port,
        max_name_length = config.analyzer.max_name_length,
        log_format = ?config.logging.format,
        "Loaded configuration"
    );

    let state = AppState::new(config.clone())?;
    let app = create_router(state);

    start_server(app, &config).await?;

    tracing::info!(event = "shutdown", "Server exited");
    Ok(())
}
