//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define watcher metrics (polls, transitions, flickers, dispatches)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `watcher_polls_total` (counter): classifications by state
//! - `watcher_query_latency_seconds` (histogram): status round trip
//! - `watcher_transitions_total` (counter): confirmed changes by from/to
//! - `watcher_flickers_total` (counter): suppressed up-transitions
//! - `watcher_dispatch_total` (counter): notifications by result
//! - `watcher_confirmed_state` (gauge): one series per state, 1 for current
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Exporter is optional and off by default

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::status::ServerState;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_poll(state: ServerState) {
    metrics::counter!("watcher_polls_total", "state" => state.as_str()).increment(1);
}

pub fn record_query_latency(latency: Duration) {
    metrics::histogram!("watcher_query_latency_seconds").record(latency.as_secs_f64());
}

pub fn record_transition(from: ServerState, to: ServerState) {
    metrics::counter!(
        "watcher_transitions_total",
        "from" => from.as_str(),
        "to" => to.as_str()
    )
    .increment(1);
    record_confirmed_state(to);
}

pub fn record_confirmed_state(current: ServerState) {
    for state in ServerState::ALL {
        let value = if state == current { 1.0 } else { 0.0 };
        metrics::gauge!("watcher_confirmed_state", "state" => state.as_str()).set(value);
    }
}

pub fn record_flicker(candidate: ServerState) {
    metrics::counter!("watcher_flickers_total", "candidate" => candidate.as_str()).increment(1);
}

/// `result` is one of `success`, `failure` or `skipped`.
pub fn record_dispatch(result: &'static str) {
    metrics::counter!("watcher_dispatch_total", "result" => result).increment(1);
}
