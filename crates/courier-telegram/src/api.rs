//! Typed Bot API calls over any [`Transport`].

use courier_core::error::CourierError;
use courier_core::traits::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::params::GetUpdates;
use crate::types::{ApiResponse, Message, Update, User};

/// Encodes requests, calls the transport, and unwraps the response envelope.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

#[derive(Debug, Serialize)]
struct DeleteWebhook {
    drop_pending_updates: bool,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Call `method` with `request` as its JSON body.
    pub async fn call<Req, R>(&self, method: &str, request: &Req) -> Result<R, CourierError>
    where
        Req: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(request)
            .map_err(|e| CourierError::Encode(format!("{method}: {e}")))?;
        debug!("telegram {method}: {} byte request", body.len());
        let raw = self.transport.call(method, body).await?;
        decode_response(&raw)
    }

    pub async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>, CourierError> {
        self.call("getUpdates", request).await
    }

    pub async fn get_me(&self) -> Result<User, CourierError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Remove any webhook so `getUpdates` is allowed.
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, CourierError> {
        self.call(
            "deleteWebhook",
            &DeleteWebhook {
                drop_pending_updates,
            },
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message, CourierError> {
        self.call("sendMessage", &SendMessage { chat_id, text })
            .await
    }
}

/// Decode a raw response body into its result or the server's error.
pub fn decode_response<R: DeserializeOwned>(raw: &[u8]) -> Result<R, CourierError> {
    let envelope: ApiResponse<R> = serde_json::from_slice(raw)?;
    envelope.into_result()
}
