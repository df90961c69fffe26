//! Dispatcher: runs every update through the middleware chain and handler.
//!
//! The chain is composed once. The first registered middleware is the
//! outermost wrapper, so it sees each update first; the terminal handler runs
//! last. A middleware may return without calling `next` to drop an update.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use crate::bot::shutdown_requested;
use crate::types::Update;


/// Application logic for one update.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, update: Update) -> anyhow::Result<()>;
}

/// Wraps a handler with cross-cutting behavior such as logging or filtering.
pub trait Middleware: Send + Sync {
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler>;
}

/// Handler backed by an async closure.
pub struct FnHandler<F> {
    f: F,
}

/// Turn `async |update| -> anyhow::Result<()>` into a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Update) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Update) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, update: Update) -> anyhow::Result<()> {
        (self.f)(update).await
    }
}

/// Middleware backed by an async closure that receives the next handler.
pub struct FnMiddleware<F> {
    f: Arc<F>,
}

/// Turn `async |update, next| -> anyhow::Result<()>` into a [`Middleware`].
pub fn middleware_fn<F, Fut>(f: F) -> FnMiddleware<F>
where
    F: Fn(Update, Arc<dyn Handler>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    FnMiddleware { f: Arc::new(f) }
}

impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(Update, Arc<dyn Handler>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    fn wrap(&self, next: Arc<dyn Handler>) -> Arc<dyn Handler> {
        Arc::new(Wrapped {
            f: self.f.clone(),
            next,
        })
    }
}

struct Wrapped<F> {
    f: Arc<F>,
    next: Arc<dyn Handler>,
}

#[async_trait]
impl<F, Fut> Handler for Wrapped<F>
where
    F: Fn(Update, Arc<dyn Handler>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn handle(&self, update: Update) -> anyhow::Result<()> {
        (self.f)(update, self.next.clone()).await
    }
}

/// Wrap `handler` so `middleware[0]` runs first.
pub fn compose(handler: Arc<dyn Handler>, middleware: &[Arc<dyn Middleware>]) -> Arc<dyn Handler> {
    middleware
        .iter()
        .rev()
        .fold(handler, |next, mw| mw.wrap(next))
}

/// Outcome counts for a dispatcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub handled: u64,
    pub failed: u64,
}

/// Consumes the hand-off channel one update at a time.
pub struct Dispatcher {
    chain: Arc<dyn Handler>,
}

impl Dispatcher {
    pub fn new(handler: Arc<dyn Handler>, middleware: &[Arc<dyn Middleware>]) -> Self {
        Self {
            chain: compose(handler, middleware),
        }
    }

    /// Run one update through the full chain.
    pub async fn dispatch(&self, update: Update) -> anyhow::Result<()> {
        self.chain.handle(update).await
    }

    /// Process updates until `shutdown` fires or the channel closes.
    ///
    /// A failing update is logged and counted; it never stops the loop. An
    /// update already taken off the channel always finishes.
    pub async fn run(
        self,
        mut rx: mpsc::Receiver<Update>,
        mut shutdown: watch::Receiver<bool>,
    ) -> DispatchStats {
        let mut stats = DispatchStats::default();
        info!("dispatcher started");

        loop {
            let update = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => break,
                next = rx.recv() => match next {
                    Some(update) => update,
                    None => break,
                },
            };

            let update_id = update.update_id;
            match self.dispatch(update).await {
                Ok(()) => stats.handled += 1,
                Err(e) => {
                    stats.failed += 1;
                    error!("update {update_id} failed: {e:#}");
                }
            }
        }

        info!(
            "dispatcher stopped ({} handled, {} failed)",
            stats.handled, stats.failed
        );
        stats
    }
}
