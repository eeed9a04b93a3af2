//! Configuration module for the PRISM engine.
//!
//! YAML configuration with environment variable interpolation and
//! validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod observability;
mod persistence;
mod server;
mod signals;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LoggingConfig, ObservabilityConfig};
pub use persistence::{PersistenceConfig, StoreBackend};
pub use server::ServerConfig;
pub use signals::SignalsConfig;

use crate::infrastructure::signals::SimulatedFeed;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PRISM_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence configuration.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Signal collection configuration.
    #[serde(default)]
    pub signals: SignalsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// The path is `path`, else `$PRISM_CONFIG`, else `config.yaml`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.yaml".to_string()),
        str::to_string,
    );

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.observability.metrics_port == Some(config.server.http_port) {
        return Err(ConfigError::ValidationError(
            "observability.metrics_port and server.http_port must be different".to_string(),
        ));
    }

    if config.persistence.backend == StoreBackend::Turso && config.persistence.db_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "persistence.db_path is required for the turso backend".to_string(),
        ));
    }

    let signals = &config.signals;
    if signals.source_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "signals.source_timeout_secs must be positive".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for name in &signals.enabled_sources {
        if SimulatedFeed::from_name(name).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "signals.enabled_sources: unknown source '{name}'"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "signals.enabled_sources: duplicate source '{name}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::LogFormat;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.persistence.backend, StoreBackend::Turso);
        assert_eq!(config.signals.enabled_sources.len(), 5);
        assert_eq!(config.signals.geography, "Global");
        assert!(config.signals.run_on_startup);
        assert_eq!(config.observability.metrics_port, None);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.signals.source_timeout_secs, 10);
        assert_eq!(config.signals.update_interval_secs, 3600);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "backend: ${PRISM_CONFIG_TEST_NONEXISTENT_VAR:-memory}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "backend: memory");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "geography: ${PRISM_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "geography: ");
    }

    #[test]
    fn test_validation_same_ports() {
        let yaml = r"
server:
  http_port: 9090
observability:
  metrics_port: 9090
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate ports");
        };
        assert!(err.to_string().contains("must be different"));
    }

    #[test]
    fn test_validation_unknown_source() {
        let yaml = r"
signals:
  enabled_sources: [CISA, Twitter]
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unknown source");
        };
        assert!(err.to_string().contains("Twitter"));
    }

    #[test]
    fn test_validation_duplicate_source() {
        let yaml = r"
signals:
  enabled_sources: [GDELT, GDELT]
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for duplicate source");
        };
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
server:
  http_port: 8080
  bind_address: "127.0.0.1"

persistence:
  backend: memory

signals:
  enabled_sources: ["CISA", "Google News"]
  geography: "Switzerland"
  source_timeout_secs: 5
  update_interval_secs: 0
  run_on_startup: false

observability:
  logging:
    level: "debug"
    format: "json"
  metrics_port: 9090
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.server.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.persistence.backend, StoreBackend::Memory);
        assert_eq!(config.signals.enabled_sources, vec!["CISA", "Google News"]);
        assert_eq!(config.signals.update_interval(), None);
        assert!(!config.signals.run_on_startup);
        assert_eq!(config.observability.logging.level, "debug");
        assert_eq!(config.observability.logging.format, LogFormat::Json);
        assert_eq!(config.observability.metrics_port, Some(9090));
    }
}
