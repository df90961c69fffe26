//! Update Fetcher: one `getUpdates` round trip.

use courier_core::error::CourierError;
use tracing::debug;

use crate::api::ApiClient;
use crate::params::GetUpdates;
use crate::types::Update;

/// Fetches one batch of updates.
///
/// No retries, reordering, or deduplication happen here; the poller owns the
/// cursor and the retry loop.
#[derive(Clone)]
pub struct UpdateFetcher {
    api: ApiClient,
}

impl UpdateFetcher {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Run `request` and return the batch in server order.
    pub async fn fetch(&self, request: &GetUpdates) -> Result<Vec<Update>, CourierError> {
        let updates = self.api.get_updates(request).await?;
        if let (Some(first), Some(last)) = (updates.first(), updates.last()) {
            debug!(
                "fetched {} updates ({}..={})",
                updates.len(),
                first.update_id,
                last.update_id
            );
        }
        Ok(updates)
    }
}
