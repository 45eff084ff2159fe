//! Status classification.
//!
//! # Responsibilities
//! - Issue one query per call
//! - Fold every query failure into `Offline`
//! - Filter the waking proxy's ghost responses by MOTD keywords and capacity
//!
//! # Design Decisions
//! - Keyword checks run in a fixed priority order; "offline" always wins
//! - A zero-capacity response without keywords is a ghost, not a server
//! - Never returns an error: the caller always gets a sample

use crate::observability::metrics;
use crate::protocol::{Endpoint, QueryClient, StatusResponse};
use crate::status::state::{ServerState, StatusSample};

/// MOTD keywords in priority order.
const KEYWORDS: [(&str, ServerState); 5] = [
    ("offline", ServerState::Offline),
    ("starting", ServerState::Starting),
    ("preparing", ServerState::Starting),
    ("stopping", ServerState::Stopping),
    ("connect to", ServerState::Waiting),
];

/// Map a successful response to a state.
pub fn classify_response(response: &StatusResponse) -> ServerState {
    let motd = &response.description;

    if let Some((_, state)) = KEYWORDS
        .iter()
        .find(|(keyword, _)| motd.contains_ignore_case(keyword))
    {
        return *state;
    }

    if response.players.max == 0 {
        return ServerState::Offline;
    }

    ServerState::Online
}

/// Queries one endpoint and classifies the result.
#[derive(Debug, Clone)]
pub struct StatusClassifier<Q> {
    client: Q,
    endpoint: Endpoint,
}

impl<Q: QueryClient> StatusClassifier<Q> {
    pub fn new(client: Q, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Take one sample of the endpoint.
    pub async fn classify(&self) -> StatusSample {
        let sample = match self.client.query(&self.endpoint).await {
            Ok(response) => {
                let state = classify_response(&response);
                tracing::debug!(
                    endpoint = %self.endpoint,
                    state = %state,
                    players_online = response.players.online,
                    players_max = response.players.max,
                    latency_ms = response.latency.as_millis() as u64,
                    "Status query answered"
                );
                metrics::record_query_latency(response.latency);
                StatusSample {
                    state,
                    raw: Some(response),
                }
            }
            Err(e) => {
                tracing::debug!(endpoint = %self.endpoint, error = %e, "Status query failed");
                StatusSample::unreachable()
            }
        };

        metrics::record_poll(sample.state);
        sample
    }
}
