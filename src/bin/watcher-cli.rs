use std::path::PathBuf;

use clap::{Parser, Subcommand};

use aternos_watcher::config;
use aternos_watcher::notify::{DispatchError, Dispatcher, MessageFormatter, Notifier};
use aternos_watcher::protocol::{Endpoint, QueryClient, SlpClient};
use aternos_watcher::status::{classify_response, ServerState};

#[derive(Parser)]
#[command(name = "watcher-cli")]
#[command(about = "Operator CLI for the Aternos Watcher", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the server once and print how it classifies
    Status {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send a test notification through the configured webhook
    Notify {
        /// State to announce (online, offline, waiting, starting, stopping)
        #[arg(long, default_value = "online")]
        state: ServerState,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Status { host, port } => {
            let endpoint = Endpoint::new(
                host.unwrap_or_else(|| config.server.host.clone()),
                port.unwrap_or(config.server.port),
            );
            let client = SlpClient::new(config.server.query_timeout());

            match client.query(&endpoint).await {
                Ok(response) => {
                    println!("Endpoint: {}", endpoint);
                    println!("State:    {}", classify_response(&response));
                    println!("Version:  {} ({})", response.version.name, response.version.protocol);
                    println!("Players:  {}/{}", response.players.online, response.players.max);
                    println!("Latency:  {} ms", response.latency.as_millis());
                    println!("MOTD:\n{}", response.description.to_ansi());
                }
                Err(e) => {
                    println!("Endpoint: {}", endpoint);
                    println!("State:    {}", ServerState::Offline);
                    println!("Reason:   {}", e);
                }
            }
        }
        Commands::Notify { state } => {
            let dispatcher = Dispatcher::from_config(&config.webhook)?;
            if !dispatcher.is_enabled() {
                return Err(DispatchError::NotConfigured.into());
            }

            let formatter = MessageFormatter::new(
                config.server.host.clone(),
                config.display.clone(),
                config.webhook.clone(),
            );
            let notification = formatter.build(state, None);
            dispatcher.send(&notification).await?;
            println!("Sent: {}", notification.title);
        }
    }

    Ok(())
}
