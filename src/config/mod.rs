//! Configuration module for desk-client.
//!
//! Configuration is loaded from a YAML file and then overridden by
//! environment variables. Every section has defaults, so running without a
//! file is valid as long as a token is supplied some other way.

mod desk;
mod logging;

pub use desk::DeskConfig;
pub use logging::{LogFormat, LogLevel, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{DeskError, Result};

/// Config file looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "desk.yaml";

/// Environment variable for configuration file path.
pub const ENV_CONFIG_PATH: &str = "DESK_CONFIG";

/// Environment variable overriding `desk.api_token`.
pub const ENV_API_TOKEN: &str = "DESK_API_TOKEN";

/// Environment variable overriding `desk.base_url`.
pub const ENV_BASE_URL: &str = "DESK_BASE_URL";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Desk API configuration.
    pub desk: DeskConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration.
    ///
    /// Priority:
    /// 1. Explicit path (must exist)
    /// 2. DESK_CONFIG environment variable
    /// 3. `desk.yaml` in the working directory
    ///
    /// Falls back to defaults if no file exists. Environment overrides are
    /// applied in every case.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path);

        let mut config = if path.exists() {
            Self::read_file(&path)?
        } else if explicit_path.is_some() {
            return Err(DeskError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a YAML file, without env overrides.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a YAML string.
    pub fn load_from_str(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DeskError::config_with_source(
                format!("Failed to read config file: {}", path.display()),
                e,
            )
        })?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| DeskError::config_with_source("Failed to parse config", e))
    }

    /// Resolves the configuration file path based on priority.
    fn resolve_config_path(explicit_path: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit_path {
            return path.to_path_buf();
        }

        if let Ok(env_path) = env::var(ENV_CONFIG_PATH) {
            return PathBuf::from(env_path);
        }

        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Applies environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    ///
    /// Unparseable values for typed settings are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.desk.api_token = Some(token);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.desk.base_url = base_url;
        }
        if let Some(timeout) = lookup("DESK_TIMEOUT_SECONDS") {
            if let Ok(timeout) = timeout.parse() {
                self.desk.timeout_seconds = timeout;
            }
        }

        if let Some(level) = lookup("DESK_LOG_LEVEL") {
            if let Ok(level) = level.parse() {
                self.logging.level = level;
            }
        }
        if let Some(format) = lookup("DESK_LOG_FORMAT") {
            if let Ok(format) = format.parse() {
                self.logging.format = format;
            }
        }
    }

    /// Validates the configuration.
    ///
    /// The API token is deliberately not checked; an empty token is sent as-is.
    pub fn validate(&self) -> Result<()> {
        if self.desk.timeout_seconds == 0 {
            return Err(DeskError::config("desk.timeout_seconds must be > 0"));
        }

        let base_url = &self.desk.base_url;
        if base_url.is_empty() {
            return Err(DeskError::config("desk.base_url must not be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DeskError::config(format!(
                "desk.base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        Ok(())
    }

    /// Returns a copy safe to print, with the API token masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if let Some(token) = &mut config.desk.api_token {
            *token = "********".to_string();
        }
        config
    }
}
