//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use aternos_watcher::config::{DisplayConfig, WebhookConfig};
use aternos_watcher::notify::{DispatchError, DispatchResult, MessageFormatter, Notification, Notifier};
use aternos_watcher::protocol::codec;
use aternos_watcher::protocol::{Endpoint, Motd, Players, QueryClient, QueryError, StatusResponse};
use aternos_watcher::status::{ServerState, StatusClassifier};
use aternos_watcher::WatchSession;

/// Build a status response with the given MOTD and player counts.
pub fn response(motd: &str, online: i64, max: i64) -> StatusResponse {
    StatusResponse {
        version: Default::default(),
        players: Players {
            online,
            max,
            sample: Vec::new(),
        },
        description: Motd::new(motd),
        latency: Duration::from_millis(12),
    }
}

pub fn online() -> Result<StatusResponse, QueryError> {
    Ok(response("§aWelcome to the server", 1, 20))
}

pub fn waiting() -> Result<StatusResponse, QueryError> {
    Ok(response("§7Connect to §aplay.example.com §7to start", 0, 0))
}

pub fn ghost_offline() -> Result<StatusResponse, QueryError> {
    Ok(response("§4This server is offline.", 0, 20))
}

pub fn starting() -> Result<StatusResponse, QueryError> {
    Ok(response("§6Starting...", 0, 0))
}

pub fn stopping() -> Result<StatusResponse, QueryError> {
    Ok(response("§6Stopping...", 0, 0))
}

pub fn unreachable() -> Result<StatusResponse, QueryError> {
    Err(QueryError::Timeout(Duration::from_secs(3)))
}

/// Query client that replays a fixed script, then reports unreachable.
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Result<StatusResponse, QueryError>>>,
    calls: Mutex<usize>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Result<StatusResponse, QueryError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        }
    }
}

/// Shared handle so tests can inspect the client after moving it.
#[derive(Clone, Default)]
pub struct SharedClient(pub Arc<ScriptedClient>);

impl SharedClient {
    pub fn new(script: Vec<Result<StatusResponse, QueryError>>) -> Self {
        Self(Arc::new(ScriptedClient::new(script)))
    }

    pub fn push(&self, result: Result<StatusResponse, QueryError>) {
        self.0.script.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> usize {
        *self.0.calls.lock().unwrap()
    }
}

impl QueryClient for SharedClient {
    async fn query(&self, _endpoint: &Endpoint) -> Result<StatusResponse, QueryError> {
        *self.0.calls.lock().unwrap() += 1;
        let next = self.0.script.lock().unwrap().pop_front();
        next.unwrap_or_else(unreachable)
    }
}

/// Notifier that records every notification and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub fn states(&self) -> Vec<ServerState> {
        self.sent.lock().unwrap().iter().map(|n| n.state).collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> DispatchResult<()> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(DispatchError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(())
    }
}

pub fn formatter() -> MessageFormatter {
    MessageFormatter::new("play.example.com", DisplayConfig::default(), WebhookConfig::default())
}

/// Session with no confirmation delay over a scripted client.
pub fn session<N: Notifier>(client: SharedClient, notifier: N) -> WatchSession<SharedClient, N> {
    WatchSession::new(
        StatusClassifier::new(client, Endpoint::new("play.example.com", 25565)),
        notifier,
        formatter(),
        Duration::from_millis(10),
        Duration::ZERO,
    )
}

/// Start a server-list-ping server that answers every query with `json`.
pub async fn start_mock_server(json: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let json = json.clone();
                    tokio::spawn(async move {
                        // Handshake, then status request.
                        if codec::read_packet(&mut socket).await.is_err() {
                            return;
                        }
                        if codec::read_packet(&mut socket).await.is_err() {
                            return;
                        }
                        let mut payload = Vec::new();
                        codec::write_string(&mut payload, &json);
                        let frame = codec::frame(codec::STATUS_RESPONSE_ID, &payload);
                        let _ = socket.write_all(&frame).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a server that answers every query with raw `bytes` and closes.
pub async fn start_raw_server(bytes: &'static [u8]) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                if codec::read_packet(&mut socket).await.is_err() {
                    return;
                }
                if codec::read_packet(&mut socket).await.is_err() {
                    return;
                }
                let _ = socket.write_all(bytes).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Start a server that accepts connections and never answers.
pub async fn start_silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}
