//! Long-polling loop that owns the update cursor.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::bot::shutdown_requested;
use crate::fetcher::UpdateFetcher;
use crate::params::PollingParams;
use crate::types::Update;


/// Smallest update id not yet confirmed. Unset until the first update lands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(Option<i64>);

impl Cursor {
    /// Start from a known offset, e.g. one saved by an earlier run.
    pub fn at(offset: i64) -> Self {
        Self(Some(offset))
    }

    /// The `offset` for the next `getUpdates` call.
    pub fn offset(&self) -> Option<i64> {
        self.0
    }

    /// Mark `update_id` as received. Never moves backwards.
    pub fn confirm(&mut self, update_id: i64) {
        let next = update_id.saturating_add(1);
        self.0 = Some(self.0.map_or(next, |current| current.max(next)));
    }
}

/// Fetches batches and publishes each update on the hand-off channel.
pub struct Poller {
    fetcher: UpdateFetcher,
    params: PollingParams,
    cursor: Cursor,
}

impl Poller {
    pub fn new(fetcher: UpdateFetcher, params: PollingParams) -> Self {
        Self {
            fetcher,
            params,
            cursor: Cursor::default(),
        }
    }

    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Poll until `shutdown` fires or the receiving side of `tx` is gone.
    ///
    /// The cursor moves past an update as soon as the channel accepts it, so
    /// stopping mid-batch never re-fetches what was already handed off.
    /// Fetch failures are logged and retried at once with the cursor
    /// unchanged; the long-poll timeout is the only pacing.
    /// Returns the final cursor.
    pub async fn run(
        mut self,
        tx: mpsc::Sender<Update>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Cursor {
        info!(
            "poller started (offset: {:?}, limit: {}, timeout: {}s)",
            self.cursor.offset(),
            self.params.limit(),
            self.params.timeout_secs()
        );

        'poll: loop {
            let request = self.params.request(self.cursor.offset());

            let fetched = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => break 'poll,
                fetched = self.fetcher.fetch(&request) => fetched,
            };

            let updates = match fetched {
                Ok(updates) => updates,
                Err(e) => {
                    match e.retry_after() {
                        Some(secs) => warn!(
                            "getUpdates failed at offset {:?} (server suggests retry after {secs}s): {e}",
                            request.offset
                        ),
                        None => warn!("getUpdates failed at offset {:?}: {e}", request.offset),
                    }
                    continue;
                }
            };

            if updates.is_empty() {
                continue;
            }

            for update in updates {
                let update_id = update.update_id;
                tokio::select! {
                    biased;
                    _ = shutdown_requested(&mut shutdown) => break 'poll,
                    sent = tx.send(update) => match sent {
                        Ok(()) => self.cursor.confirm(update_id),
                        Err(_) => {
                            info!("dispatcher is gone, poller stopping");
                            break 'poll;
                        }
                    },
                }
            }
            debug!("batch handed off, next offset {:?}", self.cursor.offset());
        }

        info!("poller stopped (offset: {:?})", self.cursor.offset());
        self.cursor
    }
}
