use crate::error::CourierError;
use async_trait::async_trait;

/// Transport trait: the wire.
///
/// Carries one encoded Bot API request to the server and hands back the raw
/// response body. Implementations do no decoding and no retries; the caller
/// owns both.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name.
    fn name(&self) -> &str;

    /// Invoke `method` with a JSON-encoded `body` and return the raw response bytes.
    async fn call(&self, method: &str, body: Vec<u8>) -> Result<Vec<u8>, CourierError>;
}
