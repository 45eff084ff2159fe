//! Query types and error definitions.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::protocol::motd::Motd;

/// Address of the watched server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Errors that can occur while querying a server.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Host name could not be resolved.
    #[error("failed to resolve '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Resolution succeeded but returned nothing.
    #[error("no addresses found for '{0}'")]
    NoAddress(String),

    /// The whole exchange took longer than the configured timeout.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// Socket-level failure (refused, reset, unexpected EOF).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server sent bytes that do not follow the protocol.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The status payload was not valid JSON.
    #[error("invalid status JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Player counts advertised by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Players {
    #[serde(default)]
    pub online: i64,
    #[serde(default)]
    pub max: i64,
    #[serde(default)]
    pub sample: Vec<PlayerSample>,
}

/// One entry of the player sample list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerSample {
    pub name: String,
    #[serde(default)]
    pub id: String,
}

/// Server software version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub protocol: i64,
}

/// Parsed status response.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub players: Players,
    #[serde(default)]
    pub description: Motd,
    /// Round trip of the status request. Not part of the JSON payload.
    #[serde(skip)]
    pub latency: Duration,
}

impl StatusResponse {
    /// Parse the JSON payload of a status response.
    pub fn from_json(payload: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// A client able to fetch a status response from an endpoint.
///
/// Implementations must resolve the host and enforce their own timeout.
pub trait QueryClient {
    fn query(
        &self,
        endpoint: &Endpoint,
    ) -> impl Future<Output = Result<StatusResponse, QueryError>> + Send;
}
