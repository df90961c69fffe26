//! reqwest-backed [`Transport`] for the public Bot API.

use async_trait::async_trait;
use courier_core::config::BotConfig;
use courier_core::error::CourierError;
use courier_core::traits::Transport;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// POSTs JSON to `{api_url}/bot{token}/{method}`.
///
/// Non-2xx responses still carry the API's JSON envelope, so their bodies are
/// returned as-is for the caller to decode.
pub struct HttpTransport {
    client: reqwest::Client,
    /// Includes the token; never log it.
    base_url: String,
}

impl HttpTransport {
    /// Create a transport from bot config.
    pub fn new(config: &BotConfig) -> Result<Self, CourierError> {
        if config.token.trim().is_empty() {
            return Err(CourierError::Validation(
                "bot token is empty. Set bot.token in config.toml or TELEGRAM_BOT_TOKEN".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CourierError::Transport(format!("failed to build http client: {e}")))?;
        let base_url = format!(
            "{}/bot{}",
            config.api_url.trim_end_matches('/'),
            config.token.trim()
        );
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn call(&self, method: &str, body: Vec<u8>) -> Result<Vec<u8>, CourierError> {
        let resp = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            // The URL holds the token.
            .map_err(|e| CourierError::Transport(format!("{method} failed: {}", e.without_url())))?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| {
            CourierError::Transport(format!("{method} body read failed: {}", e.without_url()))
        })?;

        if bytes.is_empty() && !status.is_success() {
            return Err(CourierError::Transport(format!(
                "{method} failed with status {status}"
            )));
        }

        Ok(bytes.to_vec())
    }
}
