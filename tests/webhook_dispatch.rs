//! Webhook dispatch against a mock HTTP endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use aternos_watcher::config::{DisplayConfig, WebhookConfig};
use aternos_watcher::notify::{
    DiscordWebhook, DispatchError, Dispatcher, MessageFormatter, Notifier,
};
use aternos_watcher::protocol::Endpoint;
use aternos_watcher::status::{ServerState, StatusClassifier};
use aternos_watcher::{TickOutcome, WatchSession};

mod common;

fn webhook_config(url: String) -> WebhookConfig {
    WebhookConfig {
        url: Some(url),
        mention: Some("@here".to_string()),
        ..WebhookConfig::default()
    }
}

fn formatter(webhook: &WebhookConfig) -> MessageFormatter {
    MessageFormatter::new("play.example.com", DisplayConfig::default(), webhook.clone())
}

#[tokio::test]
async fn test_webhook_posts_embed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "content": "@here",
            "embeds": [{"title": "🔴 Server OFFLINE", "color": 0xff4040}]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = webhook_config(format!("{}/hook", mock_server.uri()));
    let webhook = DiscordWebhook::new(config.url.clone().unwrap(), Duration::from_secs(5)).unwrap();

    let notification = formatter(&config).build(ServerState::Offline, None);
    webhook.send(&notification).await.unwrap();
}

#[tokio::test]
async fn test_webhook_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let config = webhook_config(format!("{}/hook", mock_server.uri()));
    let dispatcher = Dispatcher::from_config(&config).unwrap();

    let notification = formatter(&config).build(ServerState::Online, None);
    let err = dispatcher.send(&notification).await.unwrap_err();

    match err {
        DispatchError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_webhook_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let webhook = DiscordWebhook::new(format!("http://{}/hook", addr), Duration::from_secs(2)).unwrap();
    let notification = formatter(&WebhookConfig::default()).build(ServerState::Online, None);

    let err = webhook.send(&notification).await.unwrap_err();
    assert!(matches!(err, DispatchError::Http(_)), "{:?}", err);
}

#[tokio::test]
async fn test_confirmed_online_posts_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_string_contains("Server ONLINE"))
        .and(body_string_contains("**Players:** `1/20`"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = webhook_config(format!("{}/hook", mock_server.uri()));
    let client = common::SharedClient::new(vec![
        common::unreachable(),
        common::online(),
        common::online(),
        common::online(),
    ]);

    let mut session = WatchSession::new(
        StatusClassifier::new(client, Endpoint::new("play.example.com", 25565)),
        Dispatcher::from_config(&config).unwrap(),
        formatter(&config),
        Duration::from_millis(10),
        Duration::ZERO,
    );

    assert_eq!(session.tick().await, TickOutcome::Unchanged(ServerState::Offline));
    assert!(matches!(session.tick().await, TickOutcome::Confirmed { delivered: true, .. }));
    assert_eq!(session.tick().await, TickOutcome::Unchanged(ServerState::Online));
}

#[tokio::test]
async fn test_failed_webhook_does_not_block_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = webhook_config(format!("{}/hook", mock_server.uri()));
    let client = common::SharedClient::new(vec![common::online(), common::online(), common::online()]);

    let mut session = WatchSession::new(
        StatusClassifier::new(client, Endpoint::new("play.example.com", 25565)),
        Dispatcher::from_config(&config).unwrap(),
        formatter(&config),
        Duration::from_millis(10),
        Duration::ZERO,
    );

    assert_eq!(
        session.tick().await,
        TickOutcome::Confirmed {
            from: ServerState::Offline,
            to: ServerState::Online,
            delivered: false,
        }
    );
    assert_eq!(session.last_confirmed(), ServerState::Online);
    assert_eq!(session.tick().await, TickOutcome::Unchanged(ServerState::Online));
}
