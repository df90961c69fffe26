//! Middleware and the terminal handler used by `courier run`.

use async_trait::async_trait;
use courier_telegram::api::ApiClient;
use courier_telegram::dispatcher::{Handler, Middleware};
use courier_telegram::types::{Update, UpdateKind};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};


/// Logs every update on the way in and how long the rest of the chain took.
pub struct LoggingMiddleware;

struct Logged {
    next: Arc<dyn Handler>,
}

impl Middleware for LoggingMiddleware {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Logged { next })
    }
}

#[async_trait]
impl Handler for Logged {
    async fn handle(&self, update: Update) -> anyhow::Result<()> {
        let update_id = update.update_id;
        let kind = update
            .kind()
            .map(|k| k.update_type().as_str())
            .unwrap_or("unknown");
        let sender = update
            .sender()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "-".to_string());
        info!("update {update_id}: {kind} from {sender}");

        let started = Instant::now();
        let result = self.next.handle(update).await;
        debug!("update {update_id} took {:?}", started.elapsed());
        result
    }
}

/// Drops updates from users outside the allow-list. An empty list allows all.
pub struct AllowListMiddleware {
    allowed: Arc<HashSet<i64>>,
}

impl AllowListMiddleware {
    pub fn new(allowed_users: &[i64]) -> Self {
        Self {
            allowed: Arc::new(allowed_users.iter().copied().collect()),
        }
    }
}

struct AllowList {
    allowed: Arc<HashSet<i64>>,
    next: Arc<dyn Handler>,
}

impl Middleware for AllowListMiddleware {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(AllowList {
            allowed: self.allowed.clone(),
            next,
        })
    }
}

#[async_trait]
impl Handler for AllowList {
    async fn handle(&self, update: Update) -> anyhow::Result<()> {
        if self.allowed.is_empty() {
            return self.next.handle(update).await;
        }
        // Updates without a sender cannot be checked, so they are dropped too.
        match update.sender().map(|u| u.id) {
            Some(id) if self.allowed.contains(&id) => self.next.handle(update).await,
            Some(id) => {
                warn!("update {}: user {id} not in allowed_users", update.update_id);
                Ok(())
            }
            None => {
                debug!("update {}: no sender, dropped", update.update_id);
                Ok(())
            }
        }
    }
}

/// Logs incoming messages and optionally echoes their text back.
pub struct EchoHandler {
    api: ApiClient,
    echo: bool,
}

impl EchoHandler {
    pub fn new(api: ApiClient, echo: bool) -> Self {
        Self { api, echo }
    }
}

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, update: Update) -> anyhow::Result<()> {
        let Some(UpdateKind::Message(message)) = update.kind() else {
            return Ok(());
        };
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };

        info!(
            "message {} in chat {}: {} chars",
            message.message_id,
            message.chat.id,
            text.chars().count()
        );

        if self.echo {
            self.api.send_message(message.chat.id, text).await?;
        }
        Ok(())
    }
}
