//! Server liveness states.
//!
//! # States
//! - Offline: unreachable, or the proxy says the backend is down
//! - Starting: backend is booting (silent)
//! - Waiting: proxy is up and asks players to connect to wake it
//! - Online: backend is serving players
//! - Stopping: backend is shutting down (silent)
//!
//! # Design Decisions
//! - `Offline` is the boot value so startup never reports "went offline"
//! - No ordering is enforced: any state may follow any other

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::protocol::StatusResponse;

/// Discrete liveness state of the watched server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    #[default]
    Offline,
    Starting,
    Waiting,
    Online,
    Stopping,
}

impl ServerState {
    /// All states, in display order.
    pub const ALL: [ServerState; 5] = [
        ServerState::Offline,
        ServerState::Starting,
        ServerState::Waiting,
        ServerState::Online,
        ServerState::Stopping,
    ];

    /// States a player can act on. The proxy can flicker into these while
    /// waking, so they are confirmed before being reported.
    pub fn needs_confirmation(self) -> bool {
        matches!(self, ServerState::Online | ServerState::Waiting)
    }

    /// Transitional states that advance silently.
    pub fn is_silent(self) -> bool {
        matches!(self, ServerState::Starting | ServerState::Stopping)
    }

    /// Lowercase name used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ServerState::Offline => "offline",
            ServerState::Starting => "starting",
            ServerState::Waiting => "waiting",
            ServerState::Online => "online",
            ServerState::Stopping => "stopping",
        }
    }
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServerState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown server state '{}'", s))
    }
}

/// Result of one classification attempt.
#[derive(Debug, Clone)]
pub struct StatusSample {
    pub state: ServerState,
    /// Absent when the query failed outright.
    pub raw: Option<StatusResponse>,
}

impl StatusSample {
    /// Sample for a query that produced no response.
    pub fn unreachable() -> Self {
        Self {
            state: ServerState::Offline,
            raw: None,
        }
    }
}
