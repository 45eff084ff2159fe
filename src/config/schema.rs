//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watcher.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::Endpoint;
use crate::status::ServerState;

/// Root configuration for the watcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Watched server endpoint.
    pub server: ServerConfig,

    /// Polling and confirmation timing.
    pub watch: WatchConfig,

    /// Notification webhook settings.
    pub webhook: WebhookConfig,

    /// Per-state notification titles and colors.
    pub display: DisplayConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Watched server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or address of the server.
    pub host: String,

    /// Query port.
    pub port: u16,

    /// Bound on a single status query in seconds.
    pub query_timeout_secs: u64,
}

impl ServerConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 25565,
            query_timeout_secs: 3,
        }
    }
}

/// Watch loop timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Delay between polls in seconds.
    pub poll_interval_secs: u64,

    /// Wait before re-checking an "up" candidate, in seconds.
    pub confirmation_delay_secs: u64,
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_secs(self.confirmation_delay_secs)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            confirmation_delay_secs: 5,
        }
    }
}

/// Webhook configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Webhook URL. Notifications are only logged when absent.
    pub url: Option<String>,

    /// Message content sent alongside the embed (e.g. a role mention).
    pub mention: Option<String>,

    /// Include the player count for up states.
    pub show_players: bool,

    /// Include the MOTD for up states.
    pub show_motd: bool,

    pub footer_text: Option<String>,
    pub footer_icon: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author_name: Option<String>,
    pub author_icon: Option<String>,
    pub author_url: Option<String>,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            mention: None,
            show_players: true,
            show_motd: true,
            footer_text: Some("Aternos Watcher".to_string()),
            footer_icon: None,
            thumbnail_url: None,
            author_name: None,
            author_icon: None,
            author_url: None,
            timeout_secs: 10,
        }
    }
}

/// Title and color of a notification.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StateDisplay {
    pub title: String,

    /// Six hex digits, optional leading `#`.
    pub color: String,
}

impl StateDisplay {
    fn new(title: &str, color: &str) -> Self {
        Self {
            title: title.to_string(),
            color: color.to_string(),
        }
    }
}

/// Parse `rrggbb` or `#rrggbb`.
pub fn parse_hex_color(value: &str) -> Option<u32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Per-state display settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub online: StateDisplay,
    pub offline: StateDisplay,
    pub waiting: StateDisplay,
    pub starting: StateDisplay,
    pub stopping: StateDisplay,
}

impl DisplayConfig {
    pub fn for_state(&self, state: ServerState) -> &StateDisplay {
        match state {
            ServerState::Online => &self.online,
            ServerState::Offline => &self.offline,
            ServerState::Waiting => &self.waiting,
            ServerState::Starting => &self.starting,
            ServerState::Stopping => &self.stopping,
        }
    }

    pub fn for_state_mut(&mut self, state: ServerState) -> &mut StateDisplay {
        match state {
            ServerState::Online => &mut self.online,
            ServerState::Offline => &mut self.offline,
            ServerState::Waiting => &mut self.waiting,
            ServerState::Starting => &mut self.starting,
            ServerState::Stopping => &mut self.stopping,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            online: StateDisplay::new("🟢 Server ONLINE!", "30c030"),
            offline: StateDisplay::new("🔴 Server OFFLINE", "ff4040"),
            waiting: StateDisplay::new("🟡 Server waiting for players", "e0c030"),
            starting: StateDisplay::new("🟠 Server STARTING", "f0a030"),
            stopping: StateDisplay::new("🟠 Server STOPPING", "f08030"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
