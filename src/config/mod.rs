// Configuration module entry point
// Layered loading: defaults, optional file, SERVER_* variables, then the
// conventional deployment variables (PORT, APP_ENV / NODE_ENV)

mod state;
mod types;

use std::net::SocketAddr;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Default config file looked up when `CONFIG_FILE` is unset
pub const DEFAULT_CONFIG_FILE: &str = "config";

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// `lookup` resolves the deployment variables so callers can supply
    /// something other than the real environment.
    pub fn load_from(
        config_path: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let builder = with_defaults(config::Config::builder())?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            );

        with_deployment_overrides(builder, lookup)?
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from an in-memory TOML document on top of the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        with_defaults(config::Config::builder())?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive", true)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("performance.shutdown_grace", 10)?
        .set_default("http.server_name", "pipeline-demo/1.0")?
        .set_default("http.max_body_size", 102_400) // 100KB
}

fn with_deployment_overrides(
    builder: ConfigBuilder<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let port = lookup("PORT").filter(|p| !p.trim().is_empty());
    let environment = lookup("APP_ENV")
        .or_else(|| lookup("NODE_ENV"))
        .filter(|e| !e.trim().is_empty());

    builder
        .set_override_option("server.port", port)?
        .set_override_option("service.environment", environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::load_from("does-not-exist", lookup_from(&[])).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.service.environment, "development");
        assert_eq!(cfg.http.max_body_size, 102_400);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_port_and_environment_overrides() {
        let cfg = Config::load_from(
            "does-not-exist",
            lookup_from(&[("PORT", "8080"), ("NODE_ENV", "production")]),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.service.environment, "production");
    }

    #[test]
    fn test_app_env_wins_over_node_env() {
        let cfg = Config::load_from(
            "does-not-exist",
            lookup_from(&[("APP_ENV", "staging"), ("NODE_ENV", "production")]),
        )
        .unwrap();
        assert_eq!(cfg.service.environment, "staging");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let cfg = Config::load_from(
            "does-not-exist",
            lookup_from(&[("PORT", " "), ("APP_ENV", "")]),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.service.environment, "development");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = Config::load_from("does-not-exist", lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_service_section_keeps_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            [service]
            name = "Cloud Deployment Demo"
            platform = "Render.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.service.name, "Cloud Deployment Demo");
        assert_eq!(cfg.service.platform, "Render.com");
        assert_eq!(cfg.service.version, types::ServiceConfig::default().version);
        assert_eq!(cfg.service.features.len(), 4);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::from_toml_str("[server]\nhost = \"127.0.0.1\"\nport = 4000").unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "127.0.0.1:4000");

        let cfg = Config::from_toml_str("[server]\nhost = \"not an ip\"").unwrap();
        assert!(cfg.get_socket_addr().is_err());
    }
}
