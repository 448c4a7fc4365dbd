// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds to wait for in-flight connections after a shutdown signal
    pub shutdown_grace: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Static descriptive content reported by the informational endpoints.
///
/// Everything here is fixed for the lifetime of the process, which is what
/// keeps `/api/version` and `/api/info` byte-identical between calls.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
    pub message: String,
    pub description: String,
    pub platform: String,
    pub deployment_method: String,
    /// Deployment environment name, injected verbatim into payloads
    pub environment: String,
    pub features: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "Deployment Pipeline Demo".to_string(),
            version: "1.0.0".to_string(),
            message: "Deployment Pipeline Demo - containerized JSON service".to_string(),
            description: "Demonstrates containerized builds and automated CI/CD deployment"
                .to_string(),
            platform: "Docker".to_string(),
            deployment_method: "GitHub Actions → Docker Hub → Container host".to_string(),
            environment: "development".to_string(),
            features: vec![
                "Automated builds with GitHub Actions".to_string(),
                "Automatic image push to Docker Hub".to_string(),
                "Automatic deployment on push".to_string(),
                "Zero-downtime updates".to_string(),
            ],
        }
    }
}
