//! HTTP Client module for desk-client.
//!
//! This module provides the Desk API client, its request types and the
//! transport it sends requests through.

pub mod api;
pub mod transport;
pub mod types;


pub use api::{DeskClient, BASE_URL_PROD, DEFAULT_TIMEOUT_SECS};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
pub use types::{DeskRequest, EntityType, HsmMessage, HttpMethod};
