//! Receiver configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! file, then `ALERT_RECEIVER_*` environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use tracing::Level;

use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `ALERT_RECEIVER_BIND_ADDR`
pub const ENV_PREFIX: &str = "ALERT_RECEIVER";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "alert-receiver";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_BODY_BYTES: i64 = 2 * 1024 * 1024;

/// Log output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Receiver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiverConfig {
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Largest accepted request body (bytes)
    pub max_body_bytes: usize,
    /// Maximum tracing level (`trace`, `debug`, `info`, `warn`, `error`)
    pub log_level: String,
    /// Log layout
    pub log_format: LogFormat,
    /// Install the Prometheus recorder and serve `/metrics`
    pub metrics_enabled: bool,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES as usize,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}

impl ReceiverConfig {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// With `path` set the file must exist; otherwise `alert-receiver.*` in the
    /// working directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: ReceiverConfig = Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("max_body_bytes", DEFAULT_MAX_BODY_BYTES)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .set_default("metrics_enabled", true)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values the deserializer cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_body_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }

        self.log_level
            .parse::<Level>()
            .map_err(|err| ConfigError::Invalid {
                field: "log_level",
                reason: format!("{:?}: {}", self.log_level, err),
            })?;

        Ok(())
    }

    /// Parsed tracing level; `info` if the string was never validated
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(Some(source))
    }

    #[test]
    fn test_defaults() {
        let config = ReceiverConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(config.level(), Level::INFO);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_default_matches_loaded_defaults() {
        let loaded = ReceiverConfig::load_with(None, env(&[])).unwrap();
        let default = ReceiverConfig::default();
        assert_eq!(loaded.bind_addr, default.bind_addr);
        assert_eq!(loaded.max_body_bytes, default.max_body_bytes);
        assert_eq!(loaded.log_level, default.log_level);
    }

    #[test]
    fn test_env_overrides() {
        let config = ReceiverConfig::load_with(
            None,
            env(&[
                ("ALERT_RECEIVER_BIND_ADDR", "127.0.0.1:9093"),
                ("ALERT_RECEIVER_LOG_LEVEL", "debug"),
                ("ALERT_RECEIVER_LOG_FORMAT", "json"),
                ("ALERT_RECEIVER_METRICS_ENABLED", "false"),
            ]),
        )
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9093".parse().unwrap());
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_file_then_env() {
        let dir = std::env::temp_dir().join(format!("alert-receiver-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("receiver.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "bind_addr = \"127.0.0.1:7000\"").unwrap();
        writeln!(file, "max_body_bytes = 1024").unwrap();

        let config = ReceiverConfig::load_with(
            Some(&path),
            env(&[("ALERT_RECEIVER_BIND_ADDR", "127.0.0.1:7001")]),
        )
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:7001".parse().unwrap());
        assert_eq!(config.max_body_bytes, 1024);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = ReceiverConfig::load_with(
            Some(Path::new("/nonexistent/alert-receiver.toml")),
            env(&[]),
        );
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_invalid_values() {
        let zero = ReceiverConfig::load_with(None, env(&[("ALERT_RECEIVER_MAX_BODY_BYTES", "0")]));
        assert!(matches!(
            zero,
            Err(ConfigError::Invalid { field: "max_body_bytes", .. })
        ));

        let level = ReceiverConfig::load_with(None, env(&[("ALERT_RECEIVER_LOG_LEVEL", "loud")]));
        assert!(matches!(
            level,
            Err(ConfigError::Invalid { field: "log_level", .. })
        ));

        let addr = ReceiverConfig::load_with(None, env(&[("ALERT_RECEIVER_BIND_ADDR", "nowhere")]));
        assert!(matches!(addr, Err(ConfigError::Load(_))));

        let format = ReceiverConfig::load_with(None, env(&[("ALERT_RECEIVER_LOG_FORMAT", "xml")]));
        assert!(matches!(format, Err(ConfigError::Load(_))));
    }
}
