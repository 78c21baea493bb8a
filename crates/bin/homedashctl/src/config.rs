//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homedash.toml` in the working directory unless another path
//! is given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::Path;
use std::time::Duration;

use homedash_adapter_http::HttpConfig;
use serde::Deserialize;

/// Default config file, relative to the working directory.
pub const DEFAULT_PATH: &str = "homedash.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub backend: HttpConfig,
    /// State polling settings.
    pub poll: PollConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// State polling configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between two state fetches.
    pub interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// A missing file is only an error when the path was given explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, false)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), true)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, optional: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if optional && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HOMEDASH_BACKEND_URL") {
            self.backend.base_url = val;
        }
        if let Some(secs) = var("HOMEDASH_TIMEOUT_SECS").and_then(|val| val.parse().ok()) {
            self.backend.timeout_secs = secs;
        }
        if let Some(secs) = var("HOMEDASH_POLL_SECS").and_then(|val| val.parse().ok()) {
            self.poll.interval_secs = secs;
        }
        if let Some(val) = var("HOMEDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "backend url must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "backend url {url:?} must start with http:// or https://"
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "backend timeout must be non-zero".to_string(),
            ));
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homedash=info,warn".to_string(),
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
