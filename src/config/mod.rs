//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → .env file + ATERNOS_WATCHER_* variables (loader.rs)
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Environment wins over the file so container deployments need no file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, ConfigError};
pub use schema::{
    DisplayConfig, ObservabilityConfig, ServerConfig, StateDisplay, WatchConfig, WatcherConfig,
    WebhookConfig,
};
