// Application state module
// Immutable per-process context handed to every request

use std::time::Instant;

use super::types::{Config, ServiceConfig};

/// Application state
///
/// Built once at startup and shared read-only through an `Arc`. Nothing in
/// here is mutated after construction.
pub struct AppState {
    pub config: Config,
    started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            started_at: Instant::now(),
        }
    }

    /// Seconds elapsed since the state was created
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn environment(&self) -> &str {
        &self.config.service.environment
    }

    pub const fn service(&self) -> &ServiceConfig {
        &self.config.service
    }
}
