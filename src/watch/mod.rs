//! Watch loop subsystem.
//!
//! # Data Flow
//! ```text
//! Periodic timer
//!     → StatusClassifier::classify
//!     → session.rs (compare with confirmed state, confirm, debounce)
//!     → Notifier::send on confirmed change
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: one query in flight at most
//! - Going down is reported immediately, coming up only after a re-check
//! - Shutdown is observed while querying and while sleeping

pub mod session;

pub use session::{TickOutcome, WatchSession};
