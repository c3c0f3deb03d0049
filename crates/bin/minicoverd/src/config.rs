//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `minicover.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use minicover_adapter_mqtt::{CoverConfig, MqttConfig};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Broker connection settings.
    pub mqtt: MqttConfig,
    /// The cover driven by this daemon.
    pub cover: CoverConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `minicover.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("minicover.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MINICOVER_BROKER_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Ok(val) = std::env::var("MINICOVER_BROKER_PORT")
            && let Ok(port) = val.parse()
        {
            self.mqtt.broker_port = port;
        }
        if let Ok(val) = std::env::var("MINICOVER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_port == 0 {
            return Err(ConfigError::Validation(
                "broker port must be non-zero".to_string(),
            ));
        }
        if self.mqtt.client_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "client id must not be empty".to_string(),
            ));
        }
        if self.cover.qos > 2 {
            return Err(ConfigError::Validation(format!(
                "qos must be 0, 1 or 2, got {}",
                self.cover.qos
            )));
        }
        if let Err(err) = self.cover.settings() {
            let reason = std::error::Error::source(&err)
                .map_or_else(|| err.to_string(), ToString::to_string);
            return Err(ConfigError::Validation(reason));
        }
        Ok(())
    }

    /// Return the `host:port` broker address.
    #[must_use]
    pub fn broker_addr(&self) -> String {
        format!("{}:{}", self.mqtt.broker_host, self.mqtt.broker_port)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "minicoverd=info,minicover_app=info,minicover_adapter_mqtt=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
