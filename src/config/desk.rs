//! Desk API connection settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::{BASE_URL_PROD, DEFAULT_TIMEOUT_SECS};

/// Desk API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// API token sent as `Authorization: Key <token>`.
    pub api_token: Option<String>,

    /// API environment base URL.
    pub base_url: String,

    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: BASE_URL_PROD.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DeskConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desk_config_default() {
        let config = DeskConfig::default();
        assert!(config.api_token.is_none());
        assert_eq!(config.base_url, "https://api-cluster.postcenter.io");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
