//! # wirechat
//!
//! A client library for a single-room, single-channel chat service reachable
//! over one long-lived bidirectional WebSocket.
//!
//! `wirechat` owns the client side of the session: the channel lifecycle
//! (no automatic reconnect), the name-registration handshake that gates chat
//! participation, classification of incoming payloads into display
//! categories, and a persisted slot for the last-confirmed display name.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wirechat::config::ChatConfig;
//! use wirechat::session::ChatClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ChatConfig::from_env();
//!     let mut client = ChatClient::new(&config);
//!     client.connect(&config.server_url).await;
//!     while let Some(event) = client.run_event().await {
//!         // render client.session() state
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Connection status and error definitions
//! - [`channel`] - The single-session WebSocket channel and its manager
//! - [`protocol`] - Wire envelope and the incoming-message classifier
//! - [`session`] - The handshake state machine and the async client driver
//! - [`store`] - Display-name persistence
//! - [`config`] - Server address and storage location resolution

pub mod base;
pub mod channel;
pub mod config;
pub mod protocol;
pub mod session;
pub mod store;
