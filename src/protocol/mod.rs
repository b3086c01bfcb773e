//! Wire protocol and incoming-message classification.
//!
//! The server speaks one of two wire variants:
//! - **Json** (canonical): each frame is a serialized [`Envelope`] with a
//!   tagged message type and a string payload.
//! - **Plain** (legacy compatibility): each frame is a bare UTF-8 string and
//!   meaning is recovered by substring matching.
//!
//! Both variants are hidden behind the same pure [`classify`] function,
//! which maps a raw payload to a display category, extracted sender/body
//! fields, and an optional handshake signal. Classification never fails:
//! malformed input falls back to default fields rather than erroring.

mod classify;
mod envelope;

pub use classify::{
    classify, Classified, HandshakeSignal, MessageCategory, WireFormat, DEFAULT_SENDER,
    NAME_REJECTED_TEXT, SELF_PREFIX, WELCOME_TEXT,
};
pub use envelope::{Envelope, MessageType};
