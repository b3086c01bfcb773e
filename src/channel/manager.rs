//! Single-instance channel ownership and lifecycle events.

use super::connection::Channel;
use crate::base::status::ConnectionStatus;
use tokio::sync::mpsc;

/// A lifecycle or payload event observed on the session channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// The channel finished connecting and may now carry messages.
    Opened,
    /// One incoming text payload, in receipt order.
    Message(String),
    /// The channel ended: remote close, local close, or transport failure.
    Closed,
}

/// Owns the session's one channel and serializes its lifecycle.
///
/// At most one channel exists per manager. `open` is re-entrant (a second
/// call while a channel exists is a no-op), transport failures collapse
/// silently into `Closed`, and `Closed` is terminal: a fresh manager is the
/// only way to connect again.
pub struct ChannelManager {
    channel: Option<Channel>,
    status: ConnectionStatus,
    event_tx: mpsc::UnboundedSender<ChannelEvent>,
    event_rx: mpsc::UnboundedReceiver<ChannelEvent>,
}

impl Default for ChannelManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelManager {
    /// Create a manager with no channel, in the `Connecting` state.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            channel: None,
            status: ConnectionStatus::Connecting,
            event_tx,
            event_rx,
        }
    }

    /// Current channel status.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Whether a channel currently exists.
    pub fn has_channel(&self) -> bool {
        self.channel.is_some()
    }

    /// Establish the channel.
    ///
    /// No-op when a channel already exists or the manager has reached
    /// `Closed`. A transport failure is swallowed: the status becomes
    /// `Closed` and a single [`ChannelEvent::Closed`] is queued, with no
    /// error surfaced to the caller.
    pub async fn open(&mut self, url: &str) {
        if self.channel.is_some() {
            tracing::debug!("open ignored: channel already exists");
            return;
        }
        if self.status.is_closed() {
            tracing::debug!("open ignored: manager already closed");
            return;
        }

        match Channel::connect(url).await {
            Ok(channel) => {
                tracing::info!(url, "channel open");
                self.spawn_reader(channel.clone());
                self.channel = Some(channel);
                self.status = ConnectionStatus::Open;
                let _ = self.event_tx.send(ChannelEvent::Opened);
            }
            Err(e) => {
                tracing::debug!("channel open failed: {e}");
                self.status = ConnectionStatus::Closed;
                let _ = self.event_tx.send(ChannelEvent::Closed);
            }
        }
    }

    /// Transmit `text` verbatim as one frame.
    ///
    /// Precondition: the channel is `Open`. Calling otherwise is a caller
    /// error and is logically ignored. A send failure tears the channel
    /// down rather than reporting an error.
    pub async fn send(&mut self, text: &str) {
        let Some(channel) = self.channel.clone() else {
            tracing::debug!("send ignored: no channel");
            return;
        };
        if !self.status.is_open() {
            tracing::debug!("send ignored: channel not open");
            return;
        }
        if channel.send_text(text).await.is_err() {
            self.close().await;
        }
    }

    /// Close the channel. Idempotent; either end may initiate.
    ///
    /// The channel reference is cleared immediately so the manager holds no
    /// dangling handle; the reader task observes the closing handshake and
    /// emits the terminal [`ChannelEvent::Closed`].
    pub async fn close(&mut self) {
        let was_open = self.channel.take();
        if let Some(channel) = was_open {
            let _ = channel.close().await;
        } else if !self.status.is_closed() {
            // Closing before a channel ever existed still terminates the
            // manager and must be observable.
            let _ = self.event_tx.send(ChannelEvent::Closed);
        }
        self.status = ConnectionStatus::Closed;
    }

    /// Wait for the next channel event, in receipt order.
    ///
    /// Status transitions happen before the event is returned, so a caller
    /// observing `Closed` already sees a `Closed` status.
    pub async fn next_event(&mut self) -> Option<ChannelEvent> {
        let event = self.event_rx.recv().await?;
        if event == ChannelEvent::Closed {
            self.channel = None;
            self.status = ConnectionStatus::Closed;
        }
        Some(event)
    }

    /// Forward incoming payloads into the event queue until the stream ends.
    fn spawn_reader(&self, channel: Channel) {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            loop {
                match channel.recv_text().await {
                    Ok(Some(text)) => {
                        if tx.send(ChannelEvent::Message(text)).is_err() {
                            break;
                        }
                    }
                    Ok(None) | Err(_) => {
                        let _ = tx.send(ChannelEvent::Closed);
                        break;
                    }
                }
            }
        });
    }
}
