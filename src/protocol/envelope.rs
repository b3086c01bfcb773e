//! The structured wire envelope.

use serde::{Deserialize, Serialize};

/// Tag carried by every structured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    /// Server-originated notice (join/leave, handshake rejection).
    System,
    /// Greeting confirming the name was accepted.
    Welcome,
    /// Replay of a message sent before this client joined.
    PastMessages,
    /// A live chat line.
    Chat,
}

/// One structured frame: `{"message_type": "...", "data": "..."}`.
///
/// Only the receive path uses envelopes; outgoing frames are always bare
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub message_type: MessageType,
    pub data: String,
}
