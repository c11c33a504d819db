//! Widget state: transcript, input and session.

use serde::{Deserialize, Serialize};

use crate::client::SessionId;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the visitor.
    User,
    /// Produced by the collaborator, or the fallback text.
    Assistant,
}

impl Role {
    /// Lowercase name, also used as a CSS class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    /// A visitor message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only, insertion-ordered message log.
///
/// Only the owning widget can append; nothing can remove or reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub(crate) fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Message] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything the widget remembers between events.
///
/// Whether a reply is awaited is not stored here; it is the presence of
/// the in-flight task owned by [`super::ChatWidget`].
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    pub(crate) is_open: bool,
    pub(crate) messages: Transcript,
    pub(crate) pending_input: String,
    pub(crate) session: Option<SessionId>,
}

impl WidgetState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn messages(&self) -> &Transcript {
        &self.messages
    }

    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }
}

/// Coarse state-machine position of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPhase {
    /// Panel hidden. A send may still be in flight.
    Closed,
    /// Panel visible, nothing in flight.
    OpenIdle,
    /// Panel visible, a reply is awaited.
    OpenAwaiting,
}

impl WidgetPhase {
    pub(crate) fn derive(is_open: bool, is_awaiting_reply: bool) -> Self {
        match (is_open, is_awaiting_reply) {
            (false, _) => Self::Closed,
            (true, false) => Self::OpenIdle,
            (true, true) => Self::OpenAwaiting,
        }
    }
}

/// Read-only snapshot consumed by the renderer.
#[derive(Debug, Clone, Copy)]
pub struct WidgetView<'a> {
    pub is_open: bool,
    pub messages: &'a [Message],
    pub pending_input: &'a str,
    pub is_awaiting_reply: bool,
}

impl WidgetView<'_> {
    #[must_use]
    pub fn phase(&self) -> WidgetPhase {
        WidgetPhase::derive(self.is_open, self.is_awaiting_reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::default();
        assert!(transcript.is_empty());

        transcript.push(Message::user("Hi"));
        transcript.push(Message::assistant("Hello!"));

        let roles: Vec<_> = transcript.iter().map(Message::role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(transcript.as_slice()[1].content(), "Hello!");
    }

    #[test]
    fn test_phase_derivation() {
        assert_eq!(WidgetPhase::derive(false, false), WidgetPhase::Closed);
        assert_eq!(WidgetPhase::derive(false, true), WidgetPhase::Closed);
        assert_eq!(WidgetPhase::derive(true, false), WidgetPhase::OpenIdle);
        assert_eq!(WidgetPhase::derive(true, true), WidgetPhase::OpenAwaiting);
    }

    #[test]
    fn test_message_serializes_with_lowercase_role() {
        let json = serde_json::to_value(Message::assistant("Hello!")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "assistant", "content": "Hello!"})
        );
    }
}
