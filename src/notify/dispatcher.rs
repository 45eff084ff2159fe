//! Dispatch selection.
//!
//! A configured webhook URL selects the webhook; without one the watcher
//! degrades to log-only operation and every send reports `NotConfigured`.

use std::time::Duration;

use crate::config::WebhookConfig;
use crate::notify::types::{DispatchError, DispatchResult, Notification, Notifier};
use crate::notify::webhook::DiscordWebhook;

#[derive(Debug, Clone)]
pub enum Dispatcher {
    Webhook(DiscordWebhook),
    LogOnly,
}

impl Dispatcher {
    pub fn from_config(config: &WebhookConfig) -> DispatchResult<Self> {
        match &config.url {
            Some(url) => Ok(Dispatcher::Webhook(DiscordWebhook::new(
                url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?)),
            None => Ok(Dispatcher::LogOnly),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Dispatcher::Webhook(_))
    }
}

impl Notifier for Dispatcher {
    async fn send(&self, notification: &Notification) -> DispatchResult<()> {
        match self {
            Dispatcher::Webhook(webhook) => webhook.send(notification).await,
            Dispatcher::LogOnly => Err(DispatchError::NotConfigured),
        }
    }
}
