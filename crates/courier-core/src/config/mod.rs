mod bot;
mod defaults;


pub use bot::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CourierError;

/// Env var that overrides `bot.token`.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level Courier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Replace the configured token with a non-empty override.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.bot.token = token.trim().to_string();
        }
    }

    /// Check cross-field constraints before anything touches the network.
    pub fn validate(&self) -> Result<(), CourierError> {
        if !(1..=100).contains(&self.polling.limit) {
            return Err(CourierError::Validation(format!(
                "polling.limit must be between 1 and 100, got {}",
                self.polling.limit
            )));
        }
        if self.polling.handoff_capacity == 0 {
            return Err(CourierError::Validation(
                "polling.handoff_capacity must be at least 1".into(),
            ));
        }
        if self.bot.request_timeout_secs <= u64::from(self.polling.timeout_secs) {
            return Err(CourierError::Validation(format!(
                "bot.request_timeout_secs ({}) must exceed polling.timeout_secs ({})",
                self.bot.request_timeout_secs, self.polling.timeout_secs
            )));
        }
        if self.bot.api_url.trim().is_empty() {
            return Err(CourierError::Validation("bot.api_url is empty".into()));
        }
        Ok(())
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, CourierError> {
    toml::from_str(content).map_err(|e| CourierError::Config(format!("failed to parse config: {e}")))
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist; the caller reports
/// that once logging is up. `TELEGRAM_BOT_TOKEN` overrides the token either
/// way.
pub fn load(path: &str) -> Result<Config, CourierError> {
    let path = Path::new(path);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CourierError::Config(format!("failed to read {}: {e}", path.display())))?;
        parse(&content)?
    } else {
        Config::default()
    };

    config.apply_token_override(std::env::var(TOKEN_ENV).ok());
    config.validate()?;
    Ok(config)
}
