//! Server-list-ping client against local mock servers.

use std::time::Duration;

use aternos_watcher::protocol::{Endpoint, QueryClient, QueryError, SlpClient};
use aternos_watcher::status::{ServerState, StatusClassifier};
use tokio::net::TcpListener;

mod common;

fn endpoint(addr: std::net::SocketAddr) -> Endpoint {
    Endpoint::new(addr.ip().to_string(), addr.port())
}

#[tokio::test]
async fn test_query_parses_status() {
    let addr = common::start_mock_server(
        r#"{
            "version": {"name": "Paper 1.20.4", "protocol": 765},
            "players": {"online": 3, "max": 20},
            "description": {"text": "", "extra": [{"text": "Welcome!", "color": "green"}]}
        }"#
        .to_string(),
    )
    .await;

    let client = SlpClient::new(Duration::from_secs(2));
    let response = client.query(&endpoint(addr)).await.unwrap();

    assert_eq!(response.version.name, "Paper 1.20.4");
    assert_eq!(response.players.online, 3);
    assert_eq!(response.players.max, 20);
    assert_eq!(response.description.to_plain(), "Welcome!");
    assert!(response.description.to_ansi().starts_with("\x1b[92m"));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SlpClient::new(Duration::from_secs(2));
    let err = client.query(&endpoint(addr)).await.unwrap_err();
    assert!(matches!(err, QueryError::Io(_)), "{:?}", err);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let addr = common::start_silent_server().await;

    let client = SlpClient::new(Duration::from_millis(200));
    let err = client.query(&endpoint(addr)).await.unwrap_err();
    assert!(matches!(err, QueryError::Timeout(_)), "{:?}", err);
}

#[tokio::test]
async fn test_garbage_is_malformed() {
    // Zero-length frame.
    let addr = common::start_raw_server(&[0x00]).await;

    let client = SlpClient::new(Duration::from_secs(2));
    let err = client.query(&endpoint(addr)).await.unwrap_err();
    assert!(matches!(err, QueryError::Malformed(_)), "{:?}", err);
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let addr = common::start_mock_server("<html>".to_string()).await;

    let client = SlpClient::new(Duration::from_secs(2));
    let err = client.query(&endpoint(addr)).await.unwrap_err();
    assert!(matches!(err, QueryError::Json(_)), "{:?}", err);
}

#[tokio::test]
async fn test_classifier_filters_ghost_proxy() {
    let addr = common::start_mock_server(
        r#"{
            "version": {"name": "Aternos", "protocol": -1},
            "players": {"online": 0, "max": 20},
            "description": "§4§lThis server is offline. §7Connect to start it"
        }"#
        .to_string(),
    )
    .await;

    let classifier = StatusClassifier::new(SlpClient::new(Duration::from_secs(2)), endpoint(addr));
    let sample = classifier.classify().await;

    assert_eq!(sample.state, ServerState::Offline);
    assert!(sample.raw.is_some());
}

#[tokio::test]
async fn test_classifier_unreachable_has_no_payload() {
    let addr = common::start_silent_server().await;

    let classifier = StatusClassifier::new(SlpClient::new(Duration::from_millis(100)), endpoint(addr));
    let sample = classifier.classify().await;

    assert_eq!(sample.state, ServerState::Offline);
    assert!(sample.raw.is_none());
}
