//! Aternos Watcher daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                          WATCHER                                 │
//!   │                                                                  │
//!   │  ┌──────────┐    ┌────────────┐    ┌──────────────┐              │
//!   │  │  watch   │───▶│   status   │───▶│   protocol   │──────────────┼──▶ Game server
//!   │  │  loop    │    │ classifier │    │ list ping    │              │    (or waking proxy)
//!   │  └────┬─────┘    └────────────┘    └──────────────┘              │
//!   │       │ confirmed change                                         │
//!   │       ▼                                                          │
//!   │  ┌──────────┐    ┌────────────┐                                  │
//!   │  │  notify  │───▶│  webhook   │──────────────────────────────────┼──▶ Chat channel
//!   │  │ formatter│    │  (or log)  │                                  │
//!   │  └──────────┘    └────────────┘                                  │
//!   │                                                                  │
//!   │  ┌────────────────────────────────────────────────────────────┐  │
//!   │  │  config (TOML + env)   observability   lifecycle (signals) │  │
//!   │  └────────────────────────────────────────────────────────────┘  │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use aternos_watcher::config;
use aternos_watcher::lifecycle::{signals, Shutdown};
use aternos_watcher::observability::{logging, metrics};
use aternos_watcher::WatchSession;

#[derive(Parser)]
#[command(name = "aternos-watcher")]
#[command(about = "Watch a Minecraft server and announce when it goes up or down", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!(
        "aternos-watcher v{} starting for {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );
    tracing::info!(
        poll_interval_secs = config.watch.poll_interval_secs,
        confirmation_delay_secs = config.watch.confirmation_delay_secs,
        query_timeout_secs = config.server.query_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let session = WatchSession::from_config(&config)?;
    if config.webhook.url.is_none() {
        tracing::warn!("No webhook URL provided, notifications will only be logged");
    }

    let shutdown = Shutdown::new();
    let watcher = session.run(shutdown.subscribe());
    tokio::join!(watcher, signals::shutdown_on_signal(&shutdown));

    tracing::info!("Watcher stopped");
    Ok(())
}
