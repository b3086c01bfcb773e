//! The session channel: one WebSocket per session.
//!
//! [`Channel`] wraps a tokio-tungstenite stream with text-frame send/recv.
//! [`ChannelManager`] owns at most one channel for the lifetime of a session
//! and exposes lifecycle transitions as [`ChannelEvent`]s. There is no
//! reconnect path: once a manager reaches `Closed` it stays there, and a new
//! manager must be constructed for a new attempt.
//!
//! # Example
//! ```ignore
//! use wirechat::channel::{ChannelManager, ChannelEvent};
//!
//! let mut manager = ChannelManager::new();
//! manager.open("ws://localhost:3000").await;
//! while let Some(event) = manager.next_event().await {
//!     match event {
//!         ChannelEvent::Message(text) => println!("{text}"),
//!         ChannelEvent::Closed => break,
//!         ChannelEvent::Opened => {}
//!     }
//! }
//! ```

mod connection;
mod manager;

pub use connection::Channel;
pub use manager::{ChannelEvent, ChannelManager};
