use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/deckscout/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("deckscout").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads, parses and validates a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The provider base URL is set
    /// - The display batch is non-empty
    /// - Local sorting never applies to a partially loaded result set
    /// - Health tuning values are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(invalid("provider.base_url must not be empty"));
        }

        if self.paging.display_batch_size == 0 {
            return Err(invalid("paging.display_batch_size must be greater than zero"));
        }

        if self.sort.local_sort_threshold > self.paging.display_batch_size as u64 {
            return Err(invalid(format!(
                "sort.local_sort_threshold ({}) must not exceed paging.display_batch_size ({})",
                self.sort.local_sort_threshold, self.paging.display_batch_size
            )));
        }

        let alpha = self.health.latency_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(invalid(format!(
                "health.latency_alpha must be in (0, 1], got {}",
                alpha
            )));
        }

        if self.health.max_level == 0 {
            return Err(invalid("health.max_level must be greater than zero"));
        }

        if self.health.suspicious_run == 0 || self.health.recovery_run == 0 {
            return Err(invalid(
                "health.suspicious_run and health.recovery_run must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
