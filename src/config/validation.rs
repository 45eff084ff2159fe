//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, port valid)
//! - Check colors, webhook URL, and metrics address are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{parse_hex_color, WatcherConfig};
use crate::status::ServerState;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.host must not be empty")]
    EmptyHost,

    #[error("server.port must not be 0")]
    ZeroPort,

    #[error("{0} must be greater than 0")]
    ZeroDuration(&'static str),

    #[error("display.{state}.color '{value}' is not a six-digit hex color")]
    InvalidColor { state: ServerState, value: String },

    #[error("webhook.url '{value}' is invalid: {reason}")]
    InvalidWebhookUrl { value: String, reason: String },

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }
    if config.server.query_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("server.query_timeout_secs"));
    }
    if config.watch.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroDuration("watch.poll_interval_secs"));
    }
    if config.webhook.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("webhook.timeout_secs"));
    }

    for state in ServerState::ALL {
        let display = config.display.for_state(state);
        if parse_hex_color(&display.color).is_none() {
            errors.push(ValidationError::InvalidColor {
                state,
                value: display.color.clone(),
            });
        }
    }

    if let Some(raw) = &config.webhook.url {
        match url::Url::parse(raw) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::InvalidWebhookUrl {
                value: raw.clone(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidWebhookUrl {
                value: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    let level = config.observability.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&WatcherConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = WatcherConfig::default();
        config.server.host = "  ".to_string();
        config.server.port = 0;
        config.watch.poll_interval_secs = 0;
        config.display.waiting.color = "yellow".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyHost));
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::ZeroDuration("watch.poll_interval_secs")));
        assert!(errors.contains(&ValidationError::InvalidColor {
            state: ServerState::Waiting,
            value: "yellow".to_string(),
        }));
    }

    #[test]
    fn test_zero_confirmation_delay_is_allowed() {
        let mut config = WatcherConfig::default();
        config.watch.confirmation_delay_secs = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_webhook_url() {
        let mut config = WatcherConfig::default();
        config.webhook.url = Some("https://discord.com/api/webhooks/1/abc".to_string());
        assert!(validate_config(&config).is_ok());

        config.webhook.url = Some("not a url".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidWebhookUrl { .. }));

        config.webhook.url = Some("ftp://example.com/hook".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = WatcherConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidMetricsAddress("nowhere".to_string())]
        );
    }
}
