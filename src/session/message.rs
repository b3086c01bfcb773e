//! The immutable session-log entry.

use crate::protocol::{Classified, MessageCategory};
use time::OffsetDateTime;

/// One entry in the session log.
///
/// Created once per received payload and never mutated; the log itself is
/// append-only and strictly insertion-ordered.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub category: MessageCategory,
    /// The payload exactly as it arrived on the wire.
    pub raw: String,
    /// Derived sender display name.
    pub sender: String,
    /// Derived message body.
    pub body: String,
    /// Whether the local user authored this message.
    pub self_authored: bool,
    pub received_at: OffsetDateTime,
}

impl ChatMessage {
    /// Build a log entry from a classifier verdict, stamped with the
    /// current time.
    pub fn from_classified(raw: String, classified: Classified) -> Self {
        Self {
            category: classified.category,
            raw,
            sender: classified.sender,
            body: classified.body,
            self_authored: classified.self_authored,
            received_at: OffsetDateTime::now_utc(),
        }
    }
}
