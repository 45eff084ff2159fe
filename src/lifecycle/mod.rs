//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Logging → Metrics → Watch loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → watch loop exits between ticks → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - No final notification on shutdown
//! - Shutdown is a normal termination, not an error

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
