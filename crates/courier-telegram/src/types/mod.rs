//! Telegram Bot API object model.
//!
//! A working subset of the schema. Plain objects derive serde directly.
//! Polymorphic objects are closed enums decoded through
//! [`courier_core::tagged`].

mod background;
mod boost;
mod chat;
mod media;
mod message;
mod origin;
mod reaction;
mod response;
mod update;

#[cfg(test)]
mod tests;

pub use background::*;
pub use boost::*;
pub use chat::*;
pub use media::*;
pub use message::*;
pub use origin::*;
pub use reaction::*;
pub use response::*;
pub use update::*;
