//! Aternos Watcher library.
//!
//! Watches a Minecraft server behind a waking proxy and reports confirmed
//! state changes to a webhook.

pub mod config;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod protocol;
pub mod status;
pub mod watch;

pub use config::WatcherConfig;
pub use lifecycle::Shutdown;
pub use status::{ServerState, StatusSample};
pub use watch::{TickOutcome, WatchSession};
