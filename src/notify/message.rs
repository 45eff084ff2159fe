//! Notification formatting.
//!
//! # Responsibilities
//! - Pick the title and color for a state
//! - Describe the host, and for up states the player count and MOTD
//! - Attach the optional author, thumbnail, footer, and mention

use std::time::SystemTime;

use crate::config::{DisplayConfig, WebhookConfig};
use crate::notify::types::{Author, Footer, Notification};
use crate::protocol::StatusResponse;
use crate::status::ServerState;

/// Builds notifications from states and raw responses.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    host: String,
    display: DisplayConfig,
    webhook: WebhookConfig,
}

impl MessageFormatter {
    pub fn new(host: impl Into<String>, display: DisplayConfig, webhook: WebhookConfig) -> Self {
        Self {
            host: host.into(),
            display,
            webhook,
        }
    }

    pub fn build(&self, state: ServerState, raw: Option<&StatusResponse>) -> Notification {
        let display = self.display.for_state(state);

        Notification {
            state,
            title: display.title.clone(),
            color_hex: display.color.clone(),
            body: self.body(state, raw),
            author: self.webhook.author_name.as_ref().map(|name| Author {
                name: name.clone(),
                url: self.webhook.author_url.clone(),
                icon_url: self.webhook.author_icon.clone(),
            }),
            thumbnail_url: self.webhook.thumbnail_url.clone(),
            footer: self.webhook.footer_text.as_ref().map(|text| Footer {
                text: text.clone(),
                icon_url: self.webhook.footer_icon.clone(),
            }),
            mention: self.webhook.mention.clone(),
            timestamp: SystemTime::now(),
        }
    }

    fn body(&self, state: ServerState, raw: Option<&StatusResponse>) -> String {
        let mut body = format!("**Host:** `{}`", self.host);

        // Counts and MOTD of a ghost or starting proxy are noise.
        let Some(response) = raw.filter(|_| state.needs_confirmation()) else {
            return body;
        };

        if self.webhook.show_players {
            body.push_str(&format!(
                "\n**Players:** `{}/{}`",
                response.players.online, response.players.max
            ));
        }
        if self.webhook.show_motd {
            body.push_str(&format!(
                "\n**MOTD:**\n```\n{}\n```",
                response.description.to_plain()
            ));
        }
        body
    }
}
