//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file, applies environment
//! variable overrides, and defines constants for logging, metrics and default
//! paths. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

// =============================================================================
// Analyzer Limits
// =============================================================================

/// Maximum accepted name length in characters, after trimming
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;

// =============================================================================
// HTTP Server
// =============================================================================

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// How long in-flight connections may drain after a shutdown signal
pub const SHUTDOWN_GRACE_PERIOD_SECS: u64 = 30;

/// Probes must always hit the process, never an intermediate cache
pub const CACHE_CONTROL_HEALTH: &str = "no-store";

// =============================================================================
// Metrics
// =============================================================================

/// Prefix for every metric this service registers
pub const METRICS_NAMESPACE: &str = "nameprobe";

/// Route label used when a request matched no route
pub const UNMATCHED_ROUTE_LABEL: &str = "unmatched";

/// Latency buckets in seconds for the request duration histogram
pub const REQUEST_DURATION_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Buckets for the accepted name length histogram
pub const NAME_LENGTH_BUCKETS: &[f64] = &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0];

// =============================================================================
// Environment Overrides
// =============================================================================

const ENV_PREFIX: &str = "NAMEPROBE_";
pub const ENV_HOST: &str = formatcp!("{}HOST", ENV_PREFIX);
pub const ENV_PORT: &str = formatcp!("{}PORT", ENV_PREFIX);
pub const ENV_MAX_NAME_LENGTH: &str = formatcp!("{}MAX_NAME_LENGTH", ENV_PREFIX);
pub const ENV_LOG_FORMAT: &str = formatcp!("{}LOG_FORMAT", ENV_PREFIX);

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when neither --log-level nor RUST_LOG is set
pub const DEFAULT_LOG_FILTER: &str = "nameprobe=info,tower_http=info";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Name analysis limits
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    /// Socket address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid http.host or http.port '{}:{}': {}",
                    self.host, self.port, e
                ))
            })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Longest name accepted by /analyze, in characters (default: 100)
    #[serde(default = "AnalyzerConfig::default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_name_length: Self::default_max_name_length(),
        }
    }
}

impl AnalyzerConfig {
    fn default_max_name_length() -> usize {
        DEFAULT_MAX_NAME_LENGTH
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "Unknown log format '{}', expected \"text\" or \"json\"",
                other
            ))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "json" (structured, default) or "text" (human-readable)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: Self::default_format(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> LogFormat {
        LogFormat::Json
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `NAMEPROBE_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, then re-validate.
    ///
    /// Kept separate from [`AppConfig::apply_env`] so tests do not mutate the
    /// process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = parse_env(ENV_PORT, &port)?;
        }
        if let Some(max) = lookup(ENV_MAX_NAME_LENGTH) {
            self.analyzer.max_name_length = parse_env(ENV_MAX_NAME_LENGTH, &max)?;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzer.max_name_length == 0 {
            return Err(ConfigError::Validation(
                "analyzer.max_name_length must be at least 1".to_string(),
            ));
        }
        self.http.socket_addr()?;
        Ok(())
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Validation(format!("Invalid {} '{}': {}", key, value, e)))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
