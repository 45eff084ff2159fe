//! Debounced watch session.
//!
//! # State Transitions (per tick)
//! ```text
//! sample == confirmed          → nothing
//! sample is Online | Waiting   → wait confirmation_delay, re-sample
//!     re-sample == sample      → confirm + notify
//!     otherwise                → flicker: no notification
//! sample is Offline            → confirm + notify immediately
//! sample is Starting | Stopping → advance silently
//! ```
//!
//! # Design Decisions
//! - The confirmed state is owned here and written only by `tick`
//! - State is updated before dispatch, so a failed dispatch is not resent
//! - A flicker whose re-sample is transitional still advances silently

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::config::WatcherConfig;
use crate::notify::{DispatchError, DispatchResult, Dispatcher, MessageFormatter, Notifier};
use crate::observability::metrics;
use crate::protocol::{QueryClient, SlpClient};
use crate::status::{ServerState, StatusClassifier, StatusSample};

/// What a single tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Sample matched the confirmed state.
    Unchanged(ServerState),
    /// Confirmed state changed. `delivered` is false when the send failed
    /// or no webhook is configured.
    Confirmed {
        from: ServerState,
        to: ServerState,
        delivered: bool,
    },
    /// An up-candidate did not survive the re-check.
    Flicker {
        candidate: ServerState,
        observed: ServerState,
    },
    /// Confirmed state moved to a transitional state without notifying.
    Silent { from: ServerState, to: ServerState },
}

/// Process-scoped watch state and its collaborators.
pub struct WatchSession<Q, N> {
    classifier: StatusClassifier<Q>,
    notifier: N,
    formatter: MessageFormatter,
    last_confirmed: ServerState,
    poll_interval: Duration,
    confirmation_delay: Duration,
}

impl WatchSession<SlpClient, Dispatcher> {
    /// Wire the real query client and dispatcher from configuration.
    pub fn from_config(config: &WatcherConfig) -> DispatchResult<Self> {
        let classifier = StatusClassifier::new(
            SlpClient::new(config.server.query_timeout()),
            config.server.endpoint(),
        );
        let dispatcher = Dispatcher::from_config(&config.webhook)?;
        let formatter = MessageFormatter::new(
            config.server.host.clone(),
            config.display.clone(),
            config.webhook.clone(),
        );

        Ok(Self::new(
            classifier,
            dispatcher,
            formatter,
            config.watch.poll_interval(),
            config.watch.confirmation_delay(),
        ))
    }
}

impl<Q, N> WatchSession<Q, N>
where
    Q: QueryClient,
    N: Notifier,
{
    pub fn new(
        classifier: StatusClassifier<Q>,
        notifier: N,
        formatter: MessageFormatter,
        poll_interval: Duration,
        confirmation_delay: Duration,
    ) -> Self {
        Self {
            classifier,
            notifier,
            formatter,
            last_confirmed: ServerState::Offline,
            poll_interval,
            confirmation_delay,
        }
    }

    /// Start from a known state instead of `Offline`.
    pub fn with_initial_state(mut self, state: ServerState) -> Self {
        self.last_confirmed = state;
        self
    }

    pub fn last_confirmed(&self) -> ServerState {
        self.last_confirmed
    }

    /// Poll until a shutdown signal arrives.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            endpoint = %self.classifier.endpoint(),
            poll_interval_secs = self.poll_interval.as_secs(),
            confirmation_delay_secs = self.confirmation_delay.as_secs(),
            "Watch loop starting"
        );
        metrics::record_confirmed_state(self.last_confirmed);

        loop {
            tokio::select! {
                outcome = self.tick() => {
                    tracing::trace!(?outcome, "Tick complete");
                }
                _ = shutdown.recv() => {
                    tracing::info!("Watch loop received shutdown signal, exiting loop");
                    break;
                }
            }

            tokio::select! {
                _ = sleep(self.poll_interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Watch loop received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Classify once and act on the result.
    pub async fn tick(&mut self) -> TickOutcome {
        let sample = self.classifier.classify().await;
        if sample.state == self.last_confirmed {
            return TickOutcome::Unchanged(sample.state);
        }

        tracing::info!(
            from = %self.last_confirmed,
            to = %sample.state,
            "State change detected"
        );

        match sample.state {
            candidate if candidate.needs_confirmation() => {
                sleep(self.confirmation_delay).await;
                let recheck = self.classifier.classify().await;
                if recheck.state == candidate {
                    self.confirm(recheck).await
                } else {
                    self.flicker(candidate, recheck.state)
                }
            }
            ServerState::Offline => self.confirm(sample).await,
            transitional => self.advance_silently(transitional),
        }
    }

    async fn confirm(&mut self, sample: StatusSample) -> TickOutcome {
        let from = self.last_confirmed;
        let to = sample.state;
        self.last_confirmed = to;
        metrics::record_transition(from, to);

        let notification = self.formatter.build(to, sample.raw.as_ref());
        let delivered = match self.notifier.send(&notification).await {
            Ok(()) => {
                tracing::info!(state = %to, title = %notification.title, "Notification sent");
                metrics::record_dispatch("success");
                true
            }
            Err(DispatchError::NotConfigured) => {
                tracing::warn!(
                    state = %to,
                    title = %notification.title,
                    "No webhook URL configured, skipping notification"
                );
                metrics::record_dispatch("skipped");
                false
            }
            Err(e) => {
                tracing::error!(state = %to, error = %e, "Failed to send notification");
                metrics::record_dispatch("failure");
                false
            }
        };

        TickOutcome::Confirmed {
            from,
            to,
            delivered,
        }
    }

    fn flicker(&mut self, candidate: ServerState, observed: ServerState) -> TickOutcome {
        tracing::info!(
            candidate = %candidate,
            observed = %observed,
            confirmed = %self.last_confirmed,
            "Ghost boot detected (false positive), ignoring"
        );
        metrics::record_flicker(candidate);

        if observed.is_silent() && observed != self.last_confirmed {
            let from = self.last_confirmed;
            self.last_confirmed = observed;
            metrics::record_transition(from, observed);
        }

        TickOutcome::Flicker {
            candidate,
            observed,
        }
    }

    fn advance_silently(&mut self, to: ServerState) -> TickOutcome {
        let from = self.last_confirmed;
        self.last_confirmed = to;
        metrics::record_transition(from, to);
        tracing::info!(from = %from, to = %to, "Transitional state, not notifying");
        TickOutcome::Silent { from, to }
    }
}
