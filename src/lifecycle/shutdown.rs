//! Stop request for the watch loop.
//!
//! The signal task calls [`Shutdown::trigger`]; the watch loop holds a
//! receiver and checks it while a tick is in flight and while sleeping
//! between ticks. A tick that is interrupted is dropped before it can
//! dispatch, so stopping never produces a final notification.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
    requested: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            requested: AtomicBool::new(false),
        }
    }

    /// Receiver for the watch loop. Subscribe before spawning the loop so a
    /// trigger cannot be missed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request a stop. Only the first call broadcasts.
    pub fn trigger(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            return;
        }
        match self.tx.send(()) {
            Ok(listeners) => tracing::info!(listeners, "Shutdown requested"),
            Err(_) => tracing::info!("Shutdown requested with no watch loop running"),
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
