//! Lifecycle: wires the poller and dispatcher together and stops them.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::dispatcher::{DispatchStats, Dispatcher, Handler, Middleware};
use crate::fetcher::UpdateFetcher;
use crate::params::PollingParams;
use crate::poller::{Cursor, Poller};


/// Resolves once shutdown is requested or every sender is gone.
pub(crate) async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}

/// Builder for one polling pipeline.
pub struct Bot {
    api: ApiClient,
    params: PollingParams,
    middleware: Vec<Arc<dyn Middleware>>,
    handoff_capacity: usize,
    cursor: Cursor,
}

impl Bot {
    pub fn new(api: ApiClient, params: PollingParams) -> Self {
        Self {
            api,
            params,
            middleware: Vec::new(),
            handoff_capacity: 1,
            cursor: Cursor::default(),
        }
    }

    /// Append a middleware. Earlier registrations run first.
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Buffer size between poller and dispatcher. Clamped to at least 1.
    ///
    /// Every buffered update is already confirmed to the server, so a large
    /// buffer loses more on a crash.
    pub fn with_handoff_capacity(mut self, capacity: usize) -> Self {
        self.handoff_capacity = capacity.max(1);
        self
    }

    /// Resume from a known offset instead of the server's default.
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Spawn the poller and dispatcher. Must run inside a tokio runtime.
    pub fn start(self, handler: impl Handler + 'static) -> BotHandle {
        let (tx, rx) = mpsc::channel(self.handoff_capacity);
        let (stop_tx, stop_rx) = watch::channel(false);

        info!(
            "starting bot over {} transport ({} middleware, handoff {})",
            self.api.transport_name(),
            self.middleware.len(),
            self.handoff_capacity
        );

        let poller = Poller::new(UpdateFetcher::new(self.api), self.params).with_cursor(self.cursor);
        let dispatcher = Dispatcher::new(Arc::new(handler), &self.middleware);

        let poller = tokio::spawn(poller.run(tx, stop_rx.clone()));
        let dispatcher = tokio::spawn(dispatcher.run(rx, stop_rx));

        BotHandle {
            stop: StopHandle(Arc::new(stop_tx)),
            poller: Some(poller),
            dispatcher: Some(dispatcher),
            cursor: self.cursor,
            stats: DispatchStats::default(),
            report: None,
        }
    }
}

/// Cloneable trigger for the shared cancellation signal.
#[derive(Clone)]
pub struct StopHandle(Arc<watch::Sender<bool>>);

impl StopHandle {
    /// Request shutdown. Safe to call any number of times.
    pub fn stop(&self) {
        if !self.0.send_replace(true) {
            info!("shutdown requested");
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.0.borrow()
    }
}

/// What the pipeline left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Offset to resume from.
    pub cursor: Cursor,
    pub handled: u64,
    pub failed: u64,
}

/// Running pipeline returned by [`Bot::start`].
///
/// Dropping the handle and every [`StopHandle`] clone also stops the pipeline.
pub struct BotHandle {
    stop: StopHandle,
    /// Each task is cleared only once it has been joined.
    poller: Option<JoinHandle<Cursor>>,
    dispatcher: Option<JoinHandle<DispatchStats>>,
    cursor: Cursor,
    stats: DispatchStats,
    report: Option<ShutdownReport>,
}

impl BotHandle {
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request shutdown and wait for both tasks.
    pub async fn stop(&mut self) -> ShutdownReport {
        self.stop.stop();
        self.wait().await
    }

    /// Wait until both tasks exit. Returns the same report on every call.
    ///
    /// Cancel safe: a dropped call leaves unjoined tasks for the next one.
    pub async fn wait(&mut self) -> ShutdownReport {
        if let Some(report) = self.report {
            return report;
        }

        if let Some(poller) = self.poller.as_mut() {
            match poller.await {
                Ok(cursor) => self.cursor = cursor,
                Err(e) => error!("poller task failed: {e}"),
            }
            self.poller = None;
        }
        if let Some(dispatcher) = self.dispatcher.as_mut() {
            match dispatcher.await {
                Ok(stats) => self.stats = stats,
                Err(e) => error!("dispatcher task failed: {e}"),
            }
            self.dispatcher = None;
        }

        let report = ShutdownReport {
            cursor: self.cursor,
            handled: self.stats.handled,
            failed: self.stats.failed,
        };

        info!(
            "bot stopped (offset: {:?}, {} handled, {} failed)",
            report.cursor.offset(),
            report.handled,
            report.failed
        );
        self.report = Some(report);
        report
    }
}
