/// The lifecycle of the session channel.
///
/// A channel moves `Connecting -> Open -> Closed` and never back: `Closed`
/// is terminal for a given manager instance, and a fresh manager must be
/// constructed for a new attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// The channel has not finished (or not started) its handshake.
    #[default]
    Connecting,

    /// The channel is established and may carry messages.
    Open,

    /// The channel has ended, by either side or by transport failure.
    Closed,
}

impl ConnectionStatus {
    /// Whether outgoing frames may be transmitted.
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionStatus::Open)
    }

    /// Whether this status is terminal.
    pub fn is_closed(&self) -> bool {
        matches!(self, ConnectionStatus::Closed)
    }
}
