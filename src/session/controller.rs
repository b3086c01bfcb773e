//! The handshake state machine and outgoing-message gate.

use super::message::ChatMessage;
use crate::base::status::ConnectionStatus;
use crate::channel::ChannelEvent;
use crate::protocol::{classify, HandshakeSignal, WireFormat};

/// Commands `/quit` and `/exit` close the channel instead of being sent.
const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// An effect the controller wants performed.
///
/// The controller itself is pure; the surrounding driver executes these
/// against the channel manager and name store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Transmit `text` verbatim as one frame.
    SendText(String),
    /// Close the session channel.
    CloseChannel,
    /// Write the name to persistent storage.
    PersistName(String),
}

/// Outcome of submitting a line of chat input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub directives: Vec<Directive>,
    /// Whether the UI should clear its input buffer. True only when text
    /// was actually handed to the channel; quit commands leave the buffer
    /// untouched.
    pub clear_input: bool,
}

impl Submission {
    fn ignored() -> Self {
        Self {
            directives: Vec::new(),
            clear_input: false,
        }
    }
}

/// Drives the name-registration handshake and owns the session log.
///
/// State machine over `needs_name`: it starts `true`, clears on the welcome
/// signal, and re-raises on a name rejection. While `needs_name` is `true`,
/// no user-authored chat text leaves the client regardless of channel
/// status.
pub struct SessionController {
    format: WireFormat,
    messages: Vec<ChatMessage>,
    status: ConnectionStatus,
    needs_name: bool,
    prompt_open: bool,
    saved_name: Option<String>,
    auto_submitted: bool,
}

impl SessionController {
    /// Create a controller, seeded with the name loaded at session start.
    ///
    /// With a saved name present the prompt stays closed: the name is
    /// auto-submitted once the channel opens and the prompt only reopens if
    /// the server rejects it.
    pub fn new(format: WireFormat, saved_name: Option<String>) -> Self {
        Self {
            format,
            messages: Vec::new(),
            status: ConnectionStatus::Connecting,
            needs_name: true,
            prompt_open: saved_name.is_none(),
            saved_name,
            auto_submitted: false,
        }
    }

    /// The session log, in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Channel status as last observed.
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Whether the handshake still gates outgoing text.
    pub fn needs_name(&self) -> bool {
        self.needs_name
    }

    /// Whether the name prompt should be shown.
    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// The name the session currently considers its own.
    pub fn saved_name(&self) -> Option<&str> {
        self.saved_name.as_deref()
    }

    /// Whether chat input is currently accepted.
    pub fn can_chat(&self) -> bool {
        self.status.is_open() && !self.needs_name
    }

    /// React to a channel event.
    ///
    /// Appends at most one log entry per `Message` event, synchronously, so
    /// receipt order is display order.
    pub fn on_event(&mut self, event: ChannelEvent) -> Vec<Directive> {
        match event {
            ChannelEvent::Opened => {
                self.status = ConnectionStatus::Open;
                self.auto_submit()
            }
            ChannelEvent::Message(raw) => self.on_message(raw),
            ChannelEvent::Closed => {
                // Already-received messages stay displayed.
                self.status = ConnectionStatus::Closed;
                Vec::new()
            }
        }
    }

    /// Submit a display name from the prompt.
    ///
    /// Empty and whitespace-only names go nowhere and keep the prompt open.
    /// A real name is sent, persisted only when it differs from the stored
    /// value, and the prompt closes optimistically without waiting for the
    /// server's verdict.
    pub fn submit_name(&mut self, name: &str) -> Vec<Directive> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }

        let mut directives = vec![Directive::SendText(name.to_string())];
        if self.saved_name.as_deref() != Some(name) {
            self.saved_name = Some(name.to_string());
            directives.push(Directive::PersistName(name.to_string()));
        }
        self.prompt_open = false;
        tracing::debug!(name, "name submitted");
        directives
    }

    /// Submit a line of chat input.
    ///
    /// `/quit` and `/exit` close the channel and transmit nothing. All
    /// other non-empty text is sent verbatim, but only while the channel is
    /// open and the handshake is complete.
    pub fn submit_input(&mut self, line: &str) -> Submission {
        if line.trim().is_empty() {
            return Submission::ignored();
        }

        if QUIT_COMMANDS.contains(&line) {
            return Submission {
                directives: vec![Directive::CloseChannel],
                clear_input: false,
            };
        }

        if !self.can_chat() {
            tracing::debug!("chat input ignored: session not ready");
            return Submission::ignored();
        }

        Submission {
            directives: vec![Directive::SendText(line.to_string())],
            clear_input: true,
        }
    }

    fn on_message(&mut self, raw: String) -> Vec<Directive> {
        let classified = classify(&raw, self.format, self.saved_name.as_deref());

        match classified.signal {
            Some(HandshakeSignal::NameRejected) => {
                self.needs_name = true;
                self.prompt_open = true;
            }
            Some(HandshakeSignal::NameAccepted) => {
                self.needs_name = false;
                self.prompt_open = false;
            }
            None => {}
        }

        self.messages.push(ChatMessage::from_classified(raw, classified));
        Vec::new()
    }

    /// Offer the saved name once the channel opens, at most once per
    /// session.
    fn auto_submit(&mut self) -> Vec<Directive> {
        if self.auto_submitted {
            return Vec::new();
        }
        let Some(name) = self.saved_name.clone() else {
            return Vec::new();
        };
        self.auto_submitted = true;
        tracing::debug!(name, "auto-submitting saved name");
        vec![Directive::SendText(name)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::MessageCategory;

    fn envelope(message_type: &str, data: &str) -> String {
        format!(r#"{{"message_type":"{message_type}","data":"{data}"}}"#)
    }

    fn fresh() -> SessionController {
        SessionController::new(WireFormat::Json, None)
    }

    #[test]
    fn test_initial_state() {
        let controller = fresh();
        assert!(controller.needs_name());
        assert!(controller.prompt_open());
        assert_eq!(controller.status(), ConnectionStatus::Connecting);
        assert!(!controller.can_chat());
    }

    #[test]
    fn test_saved_name_keeps_prompt_closed() {
        let controller = SessionController::new(WireFormat::Json, Some("Alice".into()));
        assert!(!controller.prompt_open());
        assert!(controller.needs_name());
    }

    #[test]
    fn test_auto_submit_on_open() {
        let mut controller = SessionController::new(WireFormat::Json, Some("Alice".into()));
        let directives = controller.on_event(ChannelEvent::Opened);
        assert_eq!(directives, vec![Directive::SendText("Alice".into())]);

        // A second Opened never re-submits.
        let directives = controller.on_event(ChannelEvent::Opened);
        assert!(directives.is_empty());
    }

    #[test]
    fn test_no_auto_submit_without_saved_name() {
        let mut controller = fresh();
        assert!(controller.on_event(ChannelEvent::Opened).is_empty());
        assert!(controller.prompt_open());
    }

    #[test]
    fn test_whitespace_name_goes_nowhere() {
        let mut controller = fresh();
        assert!(controller.submit_name("").is_empty());
        assert!(controller.submit_name("   ").is_empty());
        assert!(controller.prompt_open());
        assert!(controller.needs_name());
    }

    #[test]
    fn test_name_submission_sends_and_persists() {
        let mut controller = fresh();
        let directives = controller.submit_name("  Alice  ");
        assert_eq!(
            directives,
            vec![
                Directive::SendText("Alice".into()),
                Directive::PersistName("Alice".into()),
            ]
        );
        // Prompt closes optimistically, gate stays up until the welcome.
        assert!(!controller.prompt_open());
        assert!(controller.needs_name());
    }

    #[test]
    fn test_resubmitting_same_name_skips_persist() {
        let mut controller = SessionController::new(WireFormat::Json, Some("Alice".into()));
        let directives = controller.submit_name("Alice");
        assert_eq!(directives, vec![Directive::SendText("Alice".into())]);
    }

    #[test]
    fn test_welcome_clears_gate_idempotently() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);
        controller.submit_name("Alice");

        let welcome = envelope("Welcome", "Welcome, Alice! You can start chatting now");
        controller.on_event(ChannelEvent::Message(welcome.clone()));
        assert!(!controller.needs_name());

        // Repeated welcomes do not toggle anything back.
        controller.on_event(ChannelEvent::Message(welcome));
        assert!(!controller.needs_name());
        assert_eq!(controller.messages().len(), 2);
    }

    #[test]
    fn test_rejection_reopens_prompt() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);
        controller.submit_name("Alice");
        assert!(!controller.prompt_open());

        let rejection = envelope("System", "Name cannot be empty");
        controller.on_event(ChannelEvent::Message(rejection));
        assert!(controller.needs_name());
        assert!(controller.prompt_open());
    }

    #[test]
    fn test_gate_blocks_chat_until_welcome() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);

        let submission = controller.submit_input("hello");
        assert!(submission.directives.is_empty());
        assert!(!submission.clear_input);

        controller.on_event(ChannelEvent::Message(envelope(
            "Welcome",
            "You can start chatting now",
        )));
        let submission = controller.submit_input("hello");
        assert_eq!(
            submission.directives,
            vec![Directive::SendText("hello".into())]
        );
        assert!(submission.clear_input);
    }

    #[test]
    fn test_chat_blocked_while_closed() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);
        controller.on_event(ChannelEvent::Message(envelope(
            "Welcome",
            "You can start chatting now",
        )));
        controller.on_event(ChannelEvent::Closed);

        let submission = controller.submit_input("hello");
        assert!(submission.directives.is_empty());
    }

    #[test]
    fn test_quit_commands_close_without_sending() {
        for command in ["/quit", "/exit"] {
            let mut controller = fresh();
            controller.on_event(ChannelEvent::Opened);
            let submission = controller.submit_input(command);
            assert_eq!(submission.directives, vec![Directive::CloseChannel]);
            assert!(!submission.clear_input, "{command} must not clear input");
        }
    }

    #[test]
    fn test_quit_with_surrounding_text_is_not_a_command() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);
        controller.on_event(ChannelEvent::Message(envelope(
            "Welcome",
            "You can start chatting now",
        )));
        let submission = controller.submit_input("/quitting now");
        assert_eq!(
            submission.directives,
            vec![Directive::SendText("/quitting now".into())]
        );
    }

    #[test]
    fn test_log_preserves_delivery_order() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);

        let payloads: Vec<String> = (0..50)
            .map(|i| envelope("Chat", &format!("Alice: message {i}")))
            .collect();
        for payload in &payloads {
            controller.on_event(ChannelEvent::Message(payload.clone()));
        }

        assert_eq!(controller.messages().len(), payloads.len());
        for (i, msg) in controller.messages().iter().enumerate() {
            assert_eq!(msg.body, format!("message {i}"));
            assert_eq!(msg.category, MessageCategory::Chat);
        }
    }

    #[test]
    fn test_closed_keeps_log() {
        let mut controller = fresh();
        controller.on_event(ChannelEvent::Opened);
        controller.on_event(ChannelEvent::Message(envelope("Chat", "Alice: hi")));
        controller.on_event(ChannelEvent::Closed);
        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.status(), ConnectionStatus::Closed);
    }
}
