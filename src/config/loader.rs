//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::WatcherConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::status::ServerState;

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "ATERNOS_WATCHER_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the effective configuration: defaults, then the optional file,
/// then `.env`, then process environment overrides.
pub fn load(path: Option<&Path>) -> Result<WatcherConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => WatcherConfig::default(),
    };

    // A missing .env is normal; variables may come from the process.
    let _ = dotenvy::dotenv();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<WatcherConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Apply `ATERNOS_WATCHER_*` overrides using `lookup` to read variables.
///
/// Empty values clear optional settings.
pub fn apply_env_overrides<F>(config: &mut WatcherConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = EnvReader {
        lookup: &lookup,
    };

    if let Some(host) = env.string("HOST") {
        config.server.host = host;
    }
    if let Some(port) = env.parsed("PORT")? {
        config.server.port = port;
    }
    if let Some(secs) = env.parsed("QUERY_TIMEOUT")? {
        config.server.query_timeout_secs = secs;
    }
    if let Some(secs) = env.parsed("UPDATE_TIME")? {
        config.watch.poll_interval_secs = secs;
    }
    if let Some(secs) = env.parsed("CONFIRM_DELAY")? {
        config.watch.confirmation_delay_secs = secs;
    }

    let webhook = &mut config.webhook;
    env.optional("WEBHOOK_URL", &mut webhook.url);
    env.optional("MENTION", &mut webhook.mention);
    env.optional("FOOTER_TEXT", &mut webhook.footer_text);
    env.optional("FOOTER_ICON", &mut webhook.footer_icon);
    env.optional("THUMBNAIL_URL", &mut webhook.thumbnail_url);
    env.optional("AUTHOR_NAME", &mut webhook.author_name);
    env.optional("AUTHOR_ICON", &mut webhook.author_icon);
    env.optional("AUTHOR_URL", &mut webhook.author_url);
    if let Some(show) = env.flag("SHOW_PLAYERS")? {
        webhook.show_players = show;
    }
    if let Some(show) = env.flag("SHOW_MOTD")? {
        webhook.show_motd = show;
    }

    for state in ServerState::ALL {
        let name = state.as_str().to_ascii_uppercase();
        let display = config.display.for_state_mut(state);
        if let Some(title) = env.string(&format!("{}_TITLE", name)) {
            display.title = title;
        }
        if let Some(color) = env.string(&format!("{}_COLOR", name)) {
            display.color = color;
        }
    }

    if let Some(level) = env.string("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(enabled) = env.flag("METRICS_ENABLED")? {
        config.observability.metrics_enabled = enabled;
    }
    if let Some(address) = env.string("METRICS_ADDRESS") {
        config.observability.metrics_address = address;
    }

    Ok(())
}

struct EnvReader<'a, F> {
    lookup: &'a F,
}

impl<F> EnvReader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, suffix: &str) -> Option<(String, String)> {
        let key = format!("{}{}", ENV_PREFIX, suffix);
        (self.lookup)(&key).map(|value| (key, value))
    }

    /// Non-empty value, trimmed.
    fn string(&self, suffix: &str) -> Option<String> {
        self.raw(suffix)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn optional(&self, suffix: &str, target: &mut Option<String>) {
        if let Some((_, value)) = self.raw(suffix) {
            let value = value.trim();
            *target = (!value.is_empty()).then(|| value.to_string());
        }
    }

    fn parsed<T>(&self, suffix: &str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let Some((key, value)) = self.raw(suffix) else {
            return Ok(None);
        };
        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                key,
                value: value.clone(),
                reason: e.to_string(),
            })
    }

    fn flag(&self, suffix: &str) -> Result<Option<bool>, ConfigError> {
        let Some((key, value)) = self.raw(suffix) else {
            return Ok(None);
        };
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnv {
                key,
                value,
                reason: "expected true or false".to_string(),
            }),
        }
    }
}
