//! The chat session: handshake state machine and client driver.
//!
//! [`SessionController`] is the functional core: a synchronous state machine
//! that consumes channel events and user actions and emits [`Directive`]s
//! describing what should happen on the channel or in the name store.
//! [`ChatClient`] is the async shell that executes those directives against
//! the real [`ChannelManager`](crate::channel::ChannelManager) and
//! [`NameStore`](crate::store::NameStore).

mod client;
mod controller;
mod message;

pub use client::ChatClient;
pub use controller::{Directive, SessionController, Submission};
pub use message::ChatMessage;
