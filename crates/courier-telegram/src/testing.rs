//! In-memory transport for tests.

use async_trait::async_trait;
use courier_core::error::CourierError;
use courier_core::traits::Transport;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Plays back scripted responses, then answers every call with an empty batch.
///
/// Once the script runs out, each call sleeps briefly to stand in for the
/// server-side long-poll wait.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Vec<u8>, CourierError>>>,
    calls: Mutex<Vec<(String, Value)>>,
    idle_delay: Duration,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Result<Vec<u8>, CourierError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
            idle_delay: Duration::from_millis(5),
        }
    }

    /// Every call so far as (method, decoded JSON body).
    pub(crate) fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// `offset` of every `getUpdates` call so far.
    pub(crate) fn offsets(&self) -> Vec<Option<i64>> {
        self.calls()
            .iter()
            .filter(|(method, _)| method == "getUpdates")
            .map(|(_, body)| body.get("offset").and_then(Value::as_i64))
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn call(&self, method: &str, body: Vec<u8>) -> Result<Vec<u8>, CourierError> {
        let decoded: Value = serde_json::from_slice(&body)?;
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), decoded));

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(response) => response,
            None => {
                tokio::time::sleep(self.idle_delay).await;
                Ok(br#"{"ok": true, "result": []}"#.to_vec())
            }
        }
    }
}

/// A successful `getUpdates` body holding bare updates with these ids.
pub(crate) fn batch(ids: &[i64]) -> Result<Vec<u8>, CourierError> {
    let updates: Vec<Value> = ids
        .iter()
        .map(|id| serde_json::json!({"update_id": id}))
        .collect();
    Ok(serde_json::to_vec(&serde_json::json!({"ok": true, "result": updates}))
        .unwrap_or_default())
}
