//! desk-client - Client binding for the Desk customer-messaging API
//!
//! This crate wraps the Desk REST endpoints (ping, accounts, agents,
//! templated messages, metadata and tickets) behind typed async methods.
//!
//! # Overview
//!
//! Every request carries `Authorization: Key <token>`. A 401 response is
//! reported as [`DeskError::Authorization`]; any other status is returned to
//! the caller unchanged, so error payloads from Desk arrive as decoded JSON.
//!
//! ```no_run
//! # async fn demo() -> desk_client::Result<()> {
//! use desk_client::{DeskClient, HsmMessage};
//!
//! let client = DeskClient::new("my-token", None)?;
//! assert_eq!(client.ping().await?, "Pong!");
//!
//! let message = HsmMessage::new("acme", "+56911112222", "welcome", ["Ana"]);
//! let receipt = client.send_hsm(&message).await?;
//! println!("{}", receipt);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`client`] - Desk API client and transport
//! - [`config`] - Configuration file parsing and validation
//! - [`error`] - Error types and error handling

pub mod cli;
pub mod client;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use cli::Cli;
pub use client::{DeskClient, EntityType, HsmMessage, Transport, BASE_URL_PROD};
pub use config::Config;
pub use error::{DeskError, Result};
