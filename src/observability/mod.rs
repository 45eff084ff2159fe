//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Classifier and watch loop produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stdout (operator log stream)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every transition is logged with before/after states
//! - Metrics are cheap (no-op without an installed recorder)

pub mod logging;
pub mod metrics;
