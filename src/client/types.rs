//! Wire types for the collaborator conversation API.
//!
//! Field names follow the collaborator's camelCase JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque conversation identifier issued by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Conversation creation
// =============================================================================

/// Body of `POST /api/conversations`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateConversationRequest<'a> {
    /// Human-readable conversation title.
    pub title: &'a str,
}

/// Response from `POST /api/conversations`.
///
/// The identifier is kept as raw JSON because the collaborator is not
/// strict about its type; see [`CreateConversationResponse::session_id`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationResponse {
    #[serde(default)]
    session_id: Option<Value>,
}

impl CreateConversationResponse {
    /// Response carrying a string identifier.
    #[must_use]
    pub fn with_session(id: impl Into<String>) -> Self {
        Self {
            session_id: Some(Value::String(id.into())),
        }
    }

    /// The usable session identifier, if the field is truthy.
    ///
    /// Accepted: non-empty strings, non-zero numbers and `true`.
    /// Everything else (missing, `null`, `false`, `0`, `""`, arrays,
    /// objects) means the conversation was not created.
    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
            .as_ref()
            .and_then(truthy_text)
            .map(SessionId::new)
    }
}

/// Text form of a truthy scalar: non-empty strings, non-zero finite numbers
/// and `true`.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0 && f.is_finite()) => {
            Some(n.to_string())
        }
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

// =============================================================================
// Message exchange
// =============================================================================

/// Body of `POST /api/conversations/{sessionId}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest<'a> {
    /// Trimmed user message.
    pub content: &'a str,
}

/// Response from `POST /api/conversations/{sessionId}/messages`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageResponse {
    #[serde(default)]
    ai_message: Option<AssistantReply>,
}

/// Assistant message object inside a reply.
///
/// `content` is raw JSON for the same reason as the session id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    content: Option<Value>,
}

impl PostMessageResponse {
    /// Response carrying an assistant reply.
    #[must_use]
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self {
            ai_message: Some(AssistantReply {
                content: Some(Value::String(content.into())),
            }),
        }
    }

    /// Assistant content worth displaying, if any.
    ///
    /// Truthy scalars count; numbers and `true` are shown as their JSON text.
    #[must_use]
    pub fn assistant_content(&self) -> Option<String> {
        self.ai_message
            .as_ref()
            .and_then(|m| m.content.as_ref())
            .and_then(truthy_text)
    }
}
