use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Bot identity and HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot API token. `TELEGRAM_BOT_TOKEN` overrides it at load time.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP timeout per request. Must exceed `polling.timeout_secs`.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// User ids allowed to reach the handler. Empty = everyone.
    #[serde(default)]
    pub allowed_users: Vec<i64>,
    /// Reply to text messages with the same text.
    #[serde(default)]
    pub echo: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            allowed_users: Vec::new(),
            echo: false,
        }
    }
}

/// Long-polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Max updates per `getUpdates` call, 1-100.
    #[serde(default = "default_limit")]
    pub limit: u8,
    /// Server-side long-poll wait. 0 = short polling, meant for testing.
    #[serde(default = "default_poll_timeout")]
    pub timeout_secs: u32,
    /// Update types to receive. Unset keeps whatever the server last recorded.
    #[serde(default)]
    pub allowed_updates: Option<Vec<String>>,
    /// Slots in the poller-to-dispatcher channel.
    #[serde(default = "default_handoff_capacity")]
    pub handoff_capacity: usize,
    /// Call `deleteWebhook` before polling starts.
    #[serde(default)]
    pub delete_webhook: bool,
    /// Ask the server to drop queued updates when deleting the webhook.
    #[serde(default)]
    pub drop_pending_updates: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            timeout_secs: default_poll_timeout(),
            allowed_updates: None,
            handoff_capacity: default_handoff_capacity(),
            delete_webhook: false,
            drop_pending_updates: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Daily-rolling log file. Unset = stdout only.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
