use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TransportError};

// ============ Server ============

/// Reachability of a monitored server, as last reported by a ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerStatus {
    /// The last ping reached the host.
    ServerUp,
    /// The last ping failed, or the server was never pinged.
    ServerDown,
}

impl ServerStatus {
    /// Wire name (`SERVER_UP` / `SERVER_DOWN`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServerUp => "SERVER_UP",
            Self::ServerDown => "SERVER_DOWN",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A monitored server.
///
/// Identity is `id`. Everything except `status` is fixed once the backend created
/// the entity; `status` is only changed by a ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Address the backend pings.
    pub ip_address: String,
    /// Display name.
    pub name: String,
    /// Free-form memory description (e.g. `"16 GB"`).
    pub memory: String,
    /// Domain-specific kind (`SERVER`, `RM`, `PRECIOUS`, ...). Stored as text by the backend.
    #[serde(rename = "type")]
    pub server_type: String,
    /// Optional picture shown next to the row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Reachability.
    pub status: ServerStatus,
}

/// A server that has not been created yet (no `id`).
///
/// The default value is what a creation form resets to: empty fields and
/// [`ServerStatus::ServerDown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDraft {
    pub ip_address: String,
    pub name: String,
    pub memory: String,
    #[serde(rename = "type")]
    pub server_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: ServerStatus,
}

impl Default for ServerDraft {
    fn default() -> Self {
        Self {
            ip_address: String::new(),
            name: String::new(),
            memory: String::new(),
            server_type: String::new(),
            image_url: None,
            status: ServerStatus::ServerDown,
        }
    }
}

impl ServerDraft {
    /// Turns the draft into a [`Server`] carrying the given identifier.
    #[must_use]
    pub fn into_server(self, id: i64) -> Server {
        Server {
            id,
            ip_address: self.ip_address,
            name: self.name,
            memory: self.memory,
            server_type: self.server_type,
            image_url: self.image_url,
            status: self.status,
        }
    }
}

// ============ Filter ============

/// Status selector of the filter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    /// No filtering: the current snapshot passes through unchanged.
    #[default]
    All,
    ServerUp,
    ServerDown,
}

impl StatusFilter {
    /// The concrete status to match, or `None` for [`StatusFilter::All`].
    pub fn as_status(self) -> Option<ServerStatus> {
        match self {
            Self::All => None,
            Self::ServerUp => Some(ServerStatus::ServerUp),
            Self::ServerDown => Some(ServerStatus::ServerDown),
        }
    }
}

impl From<ServerStatus> for StatusFilter {
    fn from(status: ServerStatus) -> Self {
        match status {
            ServerStatus::ServerUp => Self::ServerUp,
            ServerStatus::ServerDown => Self::ServerDown,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_status() {
            Some(status) => status.fmt(f),
            None => f.write_str("ALL"),
        }
    }
}

// ============ Envelope ============

/// Payload of an [`Envelope`].
///
/// The backend keys both single-entity payloads and delete acknowledgements under
/// `server`; the variants are told apart by the value's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    /// Bulk listing, in backend order.
    Servers { servers: Vec<Server> },
    /// A single entity (ping, create, get).
    Server { server: Server },
    /// Delete acknowledgement.
    Acknowledged { server: bool },
}

/// Uniform response wrapper returned by every backend call.
///
/// All metadata is optional on the wire: the backend leaves out null fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(
        default,
        with = "crate::utils::datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeData>,
}

impl Envelope {
    /// Envelope carrying a bulk listing and nothing else.
    #[must_use]
    pub fn with_servers(servers: Vec<Server>) -> Self {
        Self {
            data: Some(EnvelopeData::Servers { servers }),
            ..Self::default()
        }
    }

    /// Copy of this envelope's metadata with a different server listing.
    #[must_use]
    pub fn replace_servers(&self, servers: Vec<Server>) -> Self {
        Self {
            timestamp: self.timestamp,
            status_code: self.status_code,
            status: self.status.clone(),
            reason: self.reason.clone(),
            message: self.message.clone(),
            developer_message: self.developer_message.clone(),
            data: Some(EnvelopeData::Servers { servers }),
        }
    }

    /// Sets the message, builder style.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The bulk listing, if this envelope carries one.
    pub fn servers(&self) -> Option<&[Server]> {
        match &self.data {
            Some(EnvelopeData::Servers { servers }) => Some(servers),
            _ => None,
        }
    }

    /// The single entity, if this envelope carries one.
    pub fn server(&self) -> Option<&Server> {
        match &self.data {
            Some(EnvelopeData::Server { server }) => Some(server),
            _ => None,
        }
    }

    /// Message text, or an empty string when the backend sent none.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// Fails unless the envelope carries a bulk listing.
    pub fn expect_servers(self) -> Result<Self> {
        if self.servers().is_some() {
            Ok(self)
        } else {
            Err(TransportError::unexpected_payload("servers"))
        }
    }

    /// Fails unless the envelope carries a single entity.
    pub fn expect_server(self) -> Result<Self> {
        if self.server().is_some() {
            Ok(self)
        } else {
            Err(TransportError::unexpected_payload("server"))
        }
    }
}
