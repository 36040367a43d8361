//! Desk HTTP client API.
//!
//! Every public operation builds a [`DeskRequest`] and funnels it through
//! one private dispatcher, which attaches the `Authorization: Key <token>`
//! header, applies the request timeout and turns HTTP 401 into
//! [`DeskError::Authorization`]. Any other status is handed back untouched.

use crate::client::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
use crate::client::types::{DeskRequest, EntityType, HsmMessage, HsmPayload};
use crate::config::DeskConfig;
use crate::error::{DeskError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Production Desk API endpoint.
pub const BASE_URL_PROD: &str = "https://api-cluster.postcenter.io";

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const AUTHORIZATION: &str = "Authorization";

/// Desk API client.
///
/// Configuration is fixed at construction; clones share the transport.
#[derive(Clone)]
pub struct DeskClient<T = ReqwestTransport> {
    transport: T,
    api_token: String,
    base_url: String,
    timeout: Duration,
}

impl<T> std::fmt::Debug for DeskClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl DeskClient<ReqwestTransport> {
    /// Creates a client for the given API token.
    ///
    /// # Arguments
    /// * `api_token` - Desk API token, sent as `Authorization: Key <token>`
    /// * `base_url` - API environment; `None` selects [`BASE_URL_PROD`]
    pub fn new(api_token: impl Into<String>, base_url: Option<&str>) -> Result<Self> {
        Ok(Self::with_transport(
            ReqwestTransport::new()?,
            api_token,
            base_url,
        ))
    }

    /// Creates a client with custom timeout.
    pub fn with_timeout(
        api_token: impl Into<String>,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self::new(api_token, base_url)?.timeout(timeout))
    }

    /// Creates a client from the `desk` configuration section.
    pub fn from_config(config: &DeskConfig) -> Result<Self> {
        Self::with_timeout(
            config.api_token.clone().unwrap_or_default(),
            Some(config.base_url.as_str()),
            config.timeout(),
        )
    }
}

impl<T: Transport> DeskClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn with_transport(
        transport: T,
        api_token: impl Into<String>,
        base_url: Option<&str>,
    ) -> Self {
        Self {
            transport,
            api_token: api_token.into(),
            base_url: base_url.unwrap_or(BASE_URL_PROD).to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Replaces the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks connectivity and credentials.
    ///
    /// # Returns
    /// The `message` field of the response (normally `"Pong!"`).
    pub async fn ping(&self) -> Result<String> {
        let response = self.dispatch(DeskRequest::get("v2/ping")).await?;
        take_field(response.json()?, "message")
    }

    /// Lists every account visible to the token, in server order.
    pub async fn accounts(&self) -> Result<Vec<Value>> {
        let response = self.dispatch(DeskRequest::get("v2/accounts/all")).await?;
        take_field(response.json()?, "accounts")
    }

    /// Lists the agents of the organization.
    pub async fn agents(&self) -> Result<Vec<Value>> {
        let response = self.dispatch(DeskRequest::get("v2/agents")).await?;
        take_field(response.json()?, "agents")
    }

    /// Sends a templated (HSM) message.
    ///
    /// # Returns
    /// The decoded response body.
    pub async fn send_hsm(&self, message: &HsmMessage) -> Result<Value> {
        info!(
            account = %message.sender,
            template = %message.template,
            "Sending HSM"
        );

        let body = serde_json::to_value(message)?;
        let response = self
            .dispatch(DeskRequest::post("v2/message/hsm", body))
            .await?;
        response.json()
    }

    /// Sends a templated (HSM) message tagged with a campaign entry.
    ///
    /// `campaign_id` and `entry_id` are only sent together. If either is
    /// missing or empty, neither is included and the payload matches
    /// [`send_hsm`](Self::send_hsm).
    ///
    /// # Returns
    /// The decoded response body.
    pub async fn send_hsm_v2(
        &self,
        message: &HsmMessage,
        campaign_id: Option<&str>,
        entry_id: Option<&str>,
    ) -> Result<Value> {
        let payload = HsmPayload::new(message, campaign_id, entry_id);

        info!(
            account = %message.sender,
            template = %message.template,
            campaign_id = payload.campaign_id.unwrap_or("-"),
            entry_id = payload.entry_id.unwrap_or("-"),
            "Sending HSM"
        );

        let body = serde_json::to_value(&payload)?;
        let response = self
            .dispatch(DeskRequest::post("v2/message/hsm", body))
            .await?;
        response.json()
    }

    /// Replaces metadata on a client or ticket.
    ///
    /// # Arguments
    /// * `entity` - Entity type, used as a path segment
    /// * `entity_id` - Identifier of the client or ticket
    /// * `metadata` - Key/value pairs sent as the request body
    pub async fn put_metadata(
        &self,
        entity: EntityType,
        entity_id: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<Value> {
        let path = format!("v2/metadata/{}/{}", entity, entity_id);
        let body = serde_json::to_value(metadata)?;
        let response = self.dispatch(DeskRequest::put(path, body)).await?;
        response.json()
    }

    /// Fetches a ticket by ID.
    pub async fn get_ticket(&self, ticket_id: &str) -> Result<Value> {
        let response = self
            .dispatch(DeskRequest::get(format!("v2/ticket/{}", ticket_id)))
            .await?;
        response.json()
    }

    /// Sends one request and applies the 401 check.
    pub(crate) async fn dispatch(&self, request: DeskRequest) -> Result<TransportResponse> {
        let DeskRequest {
            method,
            path,
            query,
            body,
            mut headers,
        } = request;

        add_auth_header(&mut headers, &self.api_token);
        let url = format!("{}/{}/", self.base_url, path);

        debug!(method = %method, url = %url, "Dispatching Desk request");

        let response = self
            .transport
            .execute(TransportRequest {
                method,
                url: url.clone(),
                query,
                headers,
                body,
                timeout: self.timeout,
            })
            .await?;

        check_response_errors(&response, &url)?;
        Ok(response)
    }
}

/// Sets `Authorization: Key <token>`, replacing any header of that name.
fn add_auth_header(headers: &mut Vec<(String, String)>, token: &str) {
    headers.retain(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION));
    headers.push((AUTHORIZATION.to_string(), format!("Key {}", token)));
}

fn check_response_errors(response: &TransportResponse, url: &str) -> Result<()> {
    if response.status == 401 {
        warn!(url = %url, "Desk rejected the API token");
        return Err(DeskError::Authorization);
    }
    Ok(())
}

/// Moves `field` out of a decoded body and deserializes it.
fn take_field<R: DeserializeOwned>(mut body: Value, field: &str) -> Result<R> {
    let value = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| DeskError::missing_field(field))?;

    serde_json::from_value(value).map_err(|e| DeskError::decode(format!("field '{}'", field), e))
}
