use std::io;
use thiserror::Error;

/// Errors surfaced by the chat client.
///
/// Transport failures are deliberately coarse: the session never retries,
/// so callers only need to know that the channel is gone, not why.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Invalid server URL")]
    InvalidUrl,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("Name storage error: {0}")]
    Storage(#[from] io::Error),
}
