//! Notification types and error definitions.

use std::future::Future;
use std::time::SystemTime;

use thiserror::Error;

use crate::status::ServerState;

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Transport failure (DNS, TLS, connect, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The configured color is not six hex digits.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// No webhook URL is configured; nothing was sent.
    #[error("no webhook URL configured (set ATERNOS_WATCHER_WEBHOOK_URL)")]
    NotConfigured,
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub url: Option<String>,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub text: String,
    pub icon_url: Option<String>,
}

/// A rich message describing one confirmed state change.
#[derive(Debug, Clone)]
pub struct Notification {
    pub state: ServerState,
    pub title: String,
    /// Six hex digits, optional leading `#`.
    pub color_hex: String,
    pub body: String,
    pub author: Option<Author>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<Footer>,
    /// Plain content sent next to the rich message, e.g. a role mention.
    pub mention: Option<String>,
    pub timestamp: SystemTime,
}

/// Delivers notifications to an external channel.
pub trait Notifier {
    fn send(&self, notification: &Notification)
        -> impl Future<Output = DispatchResult<()>> + Send;
}
