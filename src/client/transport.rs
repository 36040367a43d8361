//! HTTP transport seam.
//!
//! The client never talks to the network directly. It hands a fully built
//! [`TransportRequest`] to a [`Transport`] and gets back the status code and
//! raw body. [`ReqwestTransport`] is the production implementation.

use crate::client::types::HttpMethod;
use crate::error::{DeskError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::trace;

/// A request ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl TransportRequest {
    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status code and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| DeskError::decode(format!("response body (HTTP {})", self.status), e))
    }
}

/// Executes HTTP requests on behalf of the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns whatever the server answered.
    ///
    /// Non-2xx statuses are not errors at this layer.
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| DeskError::internal_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .timeout(request.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DeskError::transport(&request.url, e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DeskError::transport(&request.url, e))?;

        trace!(url = %request.url, status, bytes = body.len(), "Received response");

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = TransportRequest {
            method: HttpMethod::Get,
            url: "https://desk.test/v2/ping/".to_string(),
            query: Vec::new(),
            headers: vec![("Authorization".to_string(), "Key abc".to_string())],
            body: None,
            timeout: Duration::from_secs(30),
        };

        assert_eq!(request.header("authorization"), Some("Key abc"));
        assert_eq!(request.header("x-missing"), None);
    }

    #[test]
    fn test_response_json() {
        let response = TransportResponse {
            status: 200,
            body: br#"{"message":"Pong!"}"#.to_vec(),
        };
        let value: Value = response.json().unwrap();
        assert_eq!(value["message"], "Pong!");
    }

    #[test]
    fn test_response_json_invalid() {
        let response = TransportResponse {
            status: 502,
            body: b"<html>bad gateway</html>".to_vec(),
        };
        let err = response.json::<Value>().unwrap_err();
        assert!(matches!(err, DeskError::Decode { .. }));
        assert!(err.to_string().contains("HTTP 502"));
    }

    #[test]
    fn test_reqwest_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }
}
