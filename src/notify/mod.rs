//! Notification dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Confirmed transition (watch loop)
//!     → message.rs (title, color, body for the state)
//!     → dispatcher.rs (webhook, or log-only when unconfigured)
//!     → webhook.rs (embed payload → HTTP POST)
//! ```
//!
//! # Design Decisions
//! - Dispatch failures are returned, and the caller only logs them
//! - The `Notifier` trait is the seam tests record notifications through

pub mod dispatcher;
pub mod message;
pub mod types;
pub mod webhook;

pub use dispatcher::Dispatcher;
pub use message::MessageFormatter;
pub use types::{Author, DispatchError, DispatchResult, Footer, Notification, Notifier};
pub use webhook::DiscordWebhook;
