//! Pure classification of incoming payloads.

use super::envelope::{Envelope, MessageType};

/// System payload that rejects a name submission.
pub const NAME_REJECTED_TEXT: &str = "Name cannot be empty";
/// Substring of the greeting that confirms a name was accepted.
pub const WELCOME_TEXT: &str = "You can start chatting now";
/// Prefix the server puts on messages echoed back to their author.
pub const SELF_PREFIX: &str = "Me:";
/// Sender used when a chat payload carries no name.
pub const DEFAULT_SENDER: &str = "User";

/// Legacy prompt asking for a name; only seen on the plain wire.
const NAME_PROMPT_TEXT: &str = "Please enter";

/// Display category of an incoming payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCategory {
    System,
    Welcome,
    PastMessage,
    Chat,
}

/// Handshake state change implied by a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeSignal {
    /// The server accepted the submitted name.
    NameAccepted,
    /// The server rejected the name (or is still asking for one).
    NameRejected,
}

/// Which wire variant the server speaks.
///
/// `Json` is canonical; `Plain` is kept as a compatibility shim for the
/// legacy bare-string protocol. The two are never active simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    #[default]
    Json,
    Plain,
}

/// The classifier's verdict on one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub category: MessageCategory,
    /// Sender display name; [`DEFAULT_SENDER`] when none could be derived.
    pub sender: String,
    /// Payload text with any sender prefix stripped.
    pub body: String,
    /// Whether the local user authored this message.
    pub self_authored: bool,
    /// Handshake transition this payload demands, if any.
    pub signal: Option<HandshakeSignal>,
}

/// Classify one raw payload.
///
/// Pure and panic-free: empty input, missing colons, and malformed JSON all
/// fall back to default fields. On the `Json` wire a frame that fails to
/// parse as an [`Envelope`] is classified with the plain-text rules instead
/// of surfacing a parse error.
pub fn classify(raw: &str, format: WireFormat, own_name: Option<&str>) -> Classified {
    match format {
        WireFormat::Json => match serde_json::from_str::<Envelope>(raw) {
            Ok(envelope) => classify_envelope(&envelope, own_name),
            Err(e) => {
                tracing::debug!("unparseable envelope, using plain rules: {e}");
                classify_plain(raw, own_name)
            }
        },
        WireFormat::Plain => classify_plain(raw, own_name),
    }
}

fn classify_envelope(envelope: &Envelope, own_name: Option<&str>) -> Classified {
    match envelope.message_type {
        MessageType::System => Classified {
            category: MessageCategory::System,
            sender: String::new(),
            body: envelope.data.clone(),
            self_authored: false,
            signal: (envelope.data == NAME_REJECTED_TEXT).then_some(HandshakeSignal::NameRejected),
        },
        MessageType::Welcome => Classified {
            category: MessageCategory::Welcome,
            sender: String::new(),
            body: envelope.data.clone(),
            self_authored: false,
            signal: envelope
                .data
                .contains(WELCOME_TEXT)
                .then_some(HandshakeSignal::NameAccepted),
        },
        MessageType::Chat | MessageType::PastMessages => {
            let category = if envelope.message_type == MessageType::Chat {
                MessageCategory::Chat
            } else {
                MessageCategory::PastMessage
            };
            let (sender, body) = split_sender(&envelope.data);
            Classified {
                self_authored: is_self(&envelope.data, &sender, own_name),
                category,
                sender,
                body,
                signal: None,
            }
        }
    }
}

fn classify_plain(raw: &str, own_name: Option<&str>) -> Classified {
    let signal = if raw.contains(WELCOME_TEXT) {
        Some(HandshakeSignal::NameAccepted)
    } else if raw.contains(NAME_PROMPT_TEXT) || raw.contains(NAME_REJECTED_TEXT) {
        Some(HandshakeSignal::NameRejected)
    } else {
        None
    };

    let is_system = ["joined", "Welcome", "left", NAME_PROMPT_TEXT]
        .iter()
        .any(|needle| raw.contains(needle));

    if is_system {
        return Classified {
            category: MessageCategory::System,
            sender: String::new(),
            body: raw.to_string(),
            self_authored: false,
            signal,
        };
    }

    let (sender, body) = split_sender(raw);
    Classified {
        self_authored: is_self(raw, &sender, own_name),
        category: MessageCategory::Chat,
        sender,
        body,
        signal,
    }
}

/// Split `"Alice: hello"` into `("Alice", "hello")`.
///
/// Without a colon (or with a leading colon) the sender defaults to
/// [`DEFAULT_SENDER`] and the body is the full input, unchanged. The body
/// after a split is trimmed of surrounding whitespace.
fn split_sender(data: &str) -> (String, String) {
    match data.find(':') {
        Some(idx) if idx > 0 => (
            data[..idx].to_string(),
            data[idx + 1..].trim().to_string(),
        ),
        _ => (DEFAULT_SENDER.to_string(), data.to_string()),
    }
}

fn is_self(raw: &str, sender: &str, own_name: Option<&str>) -> bool {
    raw.starts_with(SELF_PREFIX) || own_name.is_some_and(|name| name == sender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sender_basic() {
        assert_eq!(
            split_sender("Alice: hello"),
            ("Alice".to_string(), "hello".to_string())
        );
    }

    #[test]
    fn test_split_sender_no_colon() {
        assert_eq!(
            split_sender("hello"),
            (DEFAULT_SENDER.to_string(), "hello".to_string())
        );
    }

    #[test]
    fn test_split_sender_leading_colon() {
        assert_eq!(
            split_sender(":hello"),
            (DEFAULT_SENDER.to_string(), ":hello".to_string())
        );
    }

    #[test]
    fn test_split_sender_empty() {
        assert_eq!(
            split_sender(""),
            (DEFAULT_SENDER.to_string(), String::new())
        );
    }

    #[test]
    fn test_split_sender_trims_body_only() {
        assert_eq!(
            split_sender("Bob:   spaced out  "),
            ("Bob".to_string(), "spaced out".to_string())
        );
    }

    #[test]
    fn test_colon_in_body_is_kept() {
        assert_eq!(
            split_sender("Alice: see: this"),
            ("Alice".to_string(), "see: this".to_string())
        );
    }

    #[test]
    fn test_self_by_prefix() {
        let c = classify(
            r#"{"message_type":"Chat","data":"Me: hi there"}"#,
            WireFormat::Json,
            None,
        );
        assert!(c.self_authored);
        assert_eq!(c.body, "hi there");
    }

    #[test]
    fn test_self_by_name_match() {
        let c = classify(
            r#"{"message_type":"Chat","data":"Alice: hi"}"#,
            WireFormat::Json,
            Some("Alice"),
        );
        assert!(c.self_authored);
        let c = classify(
            r#"{"message_type":"Chat","data":"Alice: hi"}"#,
            WireFormat::Json,
            Some("Bob"),
        );
        assert!(!c.self_authored);
    }

    #[test]
    fn test_malformed_json_falls_back_to_plain() {
        let c = classify("{not json", WireFormat::Json, None);
        assert_eq!(c.category, MessageCategory::Chat);
        assert_eq!(c.sender, DEFAULT_SENDER);
        assert_eq!(c.body, "{not json");
        assert!(c.signal.is_none());
    }

    #[test]
    fn test_plain_system_substrings() {
        for payload in ["Alice joined", "Alice left", "Welcome, Alice!"] {
            let c = classify(payload, WireFormat::Plain, None);
            assert_eq!(c.category, MessageCategory::System, "{payload}");
        }
    }

    #[test]
    fn test_plain_name_prompt_signals_rejection() {
        let c = classify("Please enter your name", WireFormat::Plain, None);
        assert_eq!(c.signal, Some(HandshakeSignal::NameRejected));
        assert_eq!(c.category, MessageCategory::System);
    }

    #[test]
    fn test_plain_welcome_signals_acceptance() {
        let c = classify(
            "Welcome, Alice! You can start chatting now",
            WireFormat::Plain,
            None,
        );
        assert_eq!(c.signal, Some(HandshakeSignal::NameAccepted));
    }
}
