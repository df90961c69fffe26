//! # courier-telegram
//!
//! Telegram Bot API object model and the long-polling update pipeline.
//!
//! The pipeline is two tasks joined by a small channel: the [`poller::Poller`]
//! fetches batches with `getUpdates` and owns the offset cursor, the
//! [`dispatcher::Dispatcher`] runs each update through the middleware chain
//! and the terminal handler. [`bot::Bot`] starts both and hands back a
//! [`bot::BotHandle`] for shutdown.
//!
//! Docs: <https://core.telegram.org/bots/api>

pub mod api;
pub mod bot;
pub mod dispatcher;
pub mod fetcher;
pub mod params;
pub mod poller;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;
