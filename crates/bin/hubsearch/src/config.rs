//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hubsearch.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use serde::Deserialize;

use hubsearch_domain::config::CardConfig;
use hubsearch_domain::error::ConfigurationError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Where registries and live state come from.
    pub source: SourceConfig,
    /// Card options, same keys as the host-side card configuration.
    pub card: toml::Table,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Which adapter feeds the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in demo home.
    #[default]
    Virtual,
    /// JSON snapshot file at `source.path`.
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Snapshot path, required for [`SourceKind::Json`].
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `hubsearch.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hubsearch.toml")?;
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
        if let Ok(val) = std::env::var("HUBSEARCH_SNAPSHOT") {
            self.source.kind = SourceKind::Json;
            self.source.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("HUBSEARCH_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.source.kind == SourceKind::Json && self.source.path.is_none() {
            return Err(ConfigError::Validation(
                "source.path is required for the json source".to_string(),
            ));
        }
        self.card_config()?;
        Ok(())
    }

    /// Decode and validate the `[card]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Card`] when an option has the wrong type or
    /// an invalid value.
    pub fn card_config(&self) -> Result<CardConfig, ConfigError> {
        let value = serde_json::to_value(&self.card).map_err(ConfigurationError::Decode)?;
        Ok(CardConfig::from_value(Some(&value))?)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hubsearch=info,hubsearch_app=info".to_string(),
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
    /// The `[card]` table was rejected.
    #[error("invalid card configuration")]
    Card(#[from] ConfigurationError),
}
