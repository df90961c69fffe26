//! # courier-core
//!
//! Core traits, configuration, error handling, and tagged-union decoding for
//! the Courier Telegram client.

pub mod config;
pub mod error;
pub mod tagged;
pub mod traits;
