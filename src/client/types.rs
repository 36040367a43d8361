//! Request-side types for the Desk API.

use crate::error::DeskError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods used by the Desk endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
        }
    }
}

/// Category a metadata update targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// A Desk client (end customer).
    Client,
    /// A support ticket.
    Ticket,
}

impl EntityType {
    /// Path segment for this entity type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Client => "client",
            EntityType::Ticket => "ticket",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = DeskError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(EntityType::Client),
            "ticket" => Ok(EntityType::Ticket),
            _ => Err(DeskError::InvalidEntityType {
                value: s.to_string(),
            }),
        }
    }
}

/// A templated (HSM) message.
///
/// Serializes to the Desk wire names: `account`, `phone`, `name`,
/// `parameters`, `close_ticket` and `header`. `header` is always sent and
/// becomes `null` when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HsmMessage {
    /// Sending account.
    #[serde(rename = "account")]
    pub sender: String,

    /// Recipient phone number.
    #[serde(rename = "phone")]
    pub recipient: String,

    /// Approved template name.
    #[serde(rename = "name")]
    pub template: String,

    /// Positional template parameters.
    pub parameters: Vec<String>,

    /// Close the ticket once the message is sent.
    pub close_ticket: bool,

    /// Optional template header.
    pub header: Option<Value>,
}

impl HsmMessage {
    /// Creates a message with `close_ticket = false` and no header.
    pub fn new<I, S>(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        template: impl Into<String>,
        parameters: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            template: template.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            close_ticket: false,
            header: None,
        }
    }

    /// Sets whether the ticket is closed after sending.
    pub fn close_ticket(mut self, close_ticket: bool) -> Self {
        self.close_ticket = close_ticket;
        self
    }

    /// Sets the template header.
    pub fn with_header(mut self, header: Value) -> Self {
        self.header = Some(header);
        self
    }
}

/// HSM payload carrying the optional campaign correlation pair.
#[derive(Debug, Serialize)]
pub(crate) struct HsmPayload<'a> {
    #[serde(flatten)]
    pub message: &'a HsmMessage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<&'a str>,
}

impl<'a> HsmPayload<'a> {
    /// Builds the payload, keeping the correlation ids only as a complete pair.
    ///
    /// If either id is missing or empty, both are dropped.
    pub fn new(
        message: &'a HsmMessage,
        campaign_id: Option<&'a str>,
        entry_id: Option<&'a str>,
    ) -> Self {
        let (campaign_id, entry_id) = match (campaign_id, entry_id) {
            (Some(c), Some(e)) if !c.is_empty() && !e.is_empty() => (Some(c), Some(e)),
            _ => (None, None),
        };

        Self {
            message,
            campaign_id,
            entry_id,
        }
    }
}

/// Description of one Desk call before it reaches the dispatcher.
///
/// `path` has no leading or trailing slash; the dispatcher turns it into
/// `{base_url}/{path}/`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeskRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl DeskRequest {
    fn new(method: HttpMethod, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
            headers: Vec::new(),
        }
    }

    /// GET request without body.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    /// POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path, Some(body))
    }

    /// PUT request with a JSON body.
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path, Some(body))
    }
}
