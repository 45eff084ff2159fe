//! Status classification subsystem.
//!
//! # Data Flow
//! ```text
//! classifier.rs:
//!     QueryClient::query(endpoint)
//!     → Err(_)      → Offline, no payload
//!     → Ok(payload) → MOTD keywords / capacity → ServerState
//!
//! state.rs:
//!     ServerState (Offline | Starting | Waiting | Online | Stopping)
//!     StatusSample { state, raw }
//! ```

pub mod classifier;
pub mod state;

pub use classifier::{classify_response, StatusClassifier};
pub use state::{ServerState, StatusSample};
