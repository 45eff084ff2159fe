//! Discord-compatible webhook client.
//!
//! # Responsibilities
//! - Translate a `Notification` into a webhook payload with one embed
//! - POST it and map non-success responses to errors
//!
//! # Design Decisions
//! - One shared `reqwest::Client` with a request timeout
//! - No retries: a failed notification is dropped by the caller

use std::time::Duration;

use serde::Serialize;

use crate::config::schema::parse_hex_color;
use crate::notify::types::{DispatchError, DispatchResult, Notification, Notifier};

#[derive(Debug, Serialize)]
pub struct WebhookPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    /// RFC 3339.
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

impl WebhookPayload {
    pub fn from_notification(notification: &Notification) -> DispatchResult<Self> {
        let color = parse_hex_color(&notification.color_hex)
            .ok_or_else(|| DispatchError::InvalidColor(notification.color_hex.clone()))?;

        let embed = Embed {
            title: notification.title.clone(),
            color,
            description: notification.body.clone(),
            author: notification.author.as_ref().map(|a| EmbedAuthor {
                name: a.name.clone(),
                url: a.url.clone(),
                icon_url: a.icon_url.clone(),
            }),
            thumbnail: notification
                .thumbnail_url
                .as_ref()
                .map(|url| EmbedImage { url: url.clone() }),
            footer: notification.footer.as_ref().map(|f| EmbedFooter {
                text: f.text.clone(),
                icon_url: f.icon_url.clone(),
            }),
            timestamp: humantime::format_rfc3339_seconds(notification.timestamp).to_string(),
        };

        Ok(Self {
            content: notification.mention.clone(),
            embeds: vec![embed],
        })
    }
}

/// Webhook notifier.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>, timeout: Duration) -> DispatchResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl Notifier for DiscordWebhook {
    async fn send(&self, notification: &Notification) -> DispatchResult<()> {
        let payload = WebhookPayload::from_notification(notification)?;

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = %status, "Webhook accepted notification");
        Ok(())
    }
}
