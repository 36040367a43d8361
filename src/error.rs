//! Error types and error handling for desk-client.
//!
//! Desk itself only gets one dedicated failure kind: a 401 response maps to
//! [`DeskError::Authorization`]. Transport, decode and configuration failures
//! are wrapped so they can travel through the crate-wide [`Result`] alias,
//! but they are not reclassified.

use thiserror::Error;

/// CLI exit codes.
pub mod exit_code {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// General error
    pub const GENERAL_ERROR: i32 = 1;
    /// Configuration error
    pub const CONFIG_ERROR: i32 = 2;
    /// Connection error
    pub const CONNECTION_ERROR: i32 = 3;
    /// Timeout error
    pub const TIMEOUT_ERROR: i32 = 4;
    /// Authentication error
    pub const AUTH_ERROR: i32 = 5;
    /// Command line argument error
    pub const CLI_ERROR: i32 = 64;
}

/// The main error type for desk-client.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Desk answered with HTTP 401.
    #[error("Authorization failed: Desk rejected the API token")]
    Authorization,

    /// The HTTP round-trip itself failed (connect, TLS, timeout, body read).
    #[error("Transport error: {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response body could not be decoded as JSON.
    #[error("Failed to decode {context}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A decoded response lacks the key an operation extracts.
    #[error("Response is missing field '{field}'")]
    MissingField { field: String },

    /// Entity type outside the supported set.
    #[error("Invalid entity type '{value}'. Valid types: client, ticket")]
    InvalidEntityType { value: String },

    /// Configuration file is invalid or cannot be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Local setup failure (HTTP client or async runtime construction).
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeskError {
    /// Returns the CLI exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeskError::Config { .. } | DeskError::Yaml(_) => exit_code::CONFIG_ERROR,
            DeskError::Transport { source, .. } if source.is_timeout() => {
                exit_code::TIMEOUT_ERROR
            }
            DeskError::Transport { .. } => exit_code::CONNECTION_ERROR,
            DeskError::Authorization => exit_code::AUTH_ERROR,
            DeskError::InvalidEntityType { .. } => exit_code::CLI_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Returns true when Desk rejected the credentials.
    pub fn is_authorization(&self) -> bool {
        matches!(self, DeskError::Authorization)
    }

    /// Creates a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        DeskError::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error with a message and source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DeskError::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an internal error with a message and source.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DeskError::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a transport error for the given URL.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        DeskError::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates a decode error describing what was being decoded.
    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        DeskError::Decode {
            context: context.into(),
            source,
        }
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        DeskError::MissingField {
            field: field.into(),
        }
    }
}

/// Result type alias for desk-client operations.
pub type Result<T> = std::result::Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DeskError::Authorization.exit_code(), exit_code::AUTH_ERROR);
        assert_eq!(
            DeskError::config("bad yaml").exit_code(),
            exit_code::CONFIG_ERROR
        );
        assert_eq!(
            DeskError::InvalidEntityType {
                value: "order".to_string()
            }
            .exit_code(),
            exit_code::CLI_ERROR
        );
        assert_eq!(
            DeskError::missing_field("message").exit_code(),
            exit_code::GENERAL_ERROR
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DeskError::Authorization.to_string(),
            "Authorization failed: Desk rejected the API token"
        );
        assert_eq!(
            DeskError::missing_field("accounts").to_string(),
            "Response is missing field 'accounts'"
        );
        assert_eq!(
            DeskError::InvalidEntityType {
                value: "order".to_string()
            }
            .to_string(),
            "Invalid entity type 'order'. Valid types: client, ticket"
        );
    }

    #[test]
    fn test_decode_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DeskError::decode("ping response", source);

        assert_eq!(err.to_string(), "Failed to decode ping response");
        assert!(err.source().is_some());
        assert!(!err.is_authorization());
    }

    #[test]
    fn test_config_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = DeskError::config_with_source("Failed to read config file", io);

        assert!(err.to_string().contains("Failed to read config file"));
        assert!(err.source().is_some());
    }
}
