//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the loaded configuration and the metrics registry. Neither is
/// mutated after startup apart from the registry's atomic collectors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Creates the application state and registers all metrics collectors.
    pub fn new(config: AppConfig) -> Result<Self, prometheus::Error> {
        Ok(Self {
            config: Arc::new(config),
            metrics: Arc::new(Metrics::new()?),
        })
    }

    /// Longest name the analyzer accepts.
    pub fn max_name_length(&self) -> usize {
        self.config.analyzer.max_name_length
    }
}
