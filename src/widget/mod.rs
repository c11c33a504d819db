//! The chat widget: visibility, conversation lifecycle and message exchange.
//!
//! A [`ChatWidget`] is an explicit instance built from an injected
//! [`ConversationClient`] and [`WidgetConfig`]. Network calls run as spawned
//! tokio tasks whose handles the widget owns; their results are applied to the
//! state only when the owner calls [`ChatWidget::poll_pending`] or
//! [`ChatWidget::settle`], so every mutation happens on the owner's side.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chat_widget::client::HttpConversationClient;
//! use chat_widget::widget::{ChatWidget, WidgetConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpConversationClient::new("http://localhost:5000")?);
//! let mut widget = ChatWidget::new(client, Arc::new(WidgetConfig::default()));
//!
//! widget.activate();
//! widget.settle().await;
//!
//! widget.toggle_open();
//! widget.update_input("Where is my order?");
//! widget.send_message();
//! widget.settle().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod state;

pub use config::WidgetConfig;
pub use state::{Message, Role, Transcript, WidgetPhase, WidgetState, WidgetView};

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::client::{
    ClientError, ConversationClient, CreateConversationResponse, PostMessageResponse, SessionId,
};

type CreateTask = JoinHandle<Result<CreateConversationResponse, ClientError>>;
type SendTask = JoinHandle<Result<PostMessageResponse, ClientError>>;

/// Resolution applied to the widget state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The collaborator issued a conversation id.
    SessionEstablished(SessionId),
    /// Conversation creation failed; sends stay disabled for good.
    SessionFailed,
    /// The assistant reply was appended.
    ReplyAppended,
    /// The send succeeded but carried nothing to display.
    ReplyEmpty,
    /// The send failed and the fallback message was appended.
    ReplyFailed,
}

impl WidgetEvent {
    /// Short label used in log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionEstablished(_) => "session_established",
            Self::SessionFailed => "session_failed",
            Self::ReplyAppended => "reply_appended",
            Self::ReplyEmpty => "reply_empty",
            Self::ReplyFailed => "reply_failed",
        }
    }
}

/// Strip surrounding whitespace, including a stray byte order mark.
fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

enum Activation {
    Idle,
    Pending(CreateTask),
    Resolved,
}

/// An embeddable chat widget instance.
pub struct ChatWidget {
    client: Arc<dyn ConversationClient>,
    config: Arc<WidgetConfig>,
    state: WidgetState,
    activation: Activation,
    in_flight: Option<SendTask>,
}

impl fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatWidget")
            .field("state", &self.state)
            .field("is_awaiting_reply", &self.is_awaiting_reply())
            .finish_non_exhaustive()
    }
}

impl ChatWidget {
    /// Create a closed widget with an empty transcript and no session.
    #[must_use]
    pub fn new(client: Arc<dyn ConversationClient>, config: Arc<WidgetConfig>) -> Self {
        Self {
            client,
            config,
            state: WidgetState::default(),
            activation: Activation::Idle,
            in_flight: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// True exactly while a send task exists that has not been applied.
    #[must_use]
    pub fn is_awaiting_reply(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> WidgetPhase {
        WidgetPhase::derive(self.state.is_open, self.is_awaiting_reply())
    }

    #[must_use]
    pub fn view(&self) -> WidgetView<'_> {
        WidgetView {
            is_open: self.state.is_open,
            messages: self.state.messages.as_slice(),
            pending_input: &self.state.pending_input,
            is_awaiting_reply: self.is_awaiting_reply(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Start conversation creation. Only the first call does anything.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self) -> bool {
        if !matches!(self.activation, Activation::Idle) {
            return false;
        }

        let client = Arc::clone(&self.client);
        let title = self.config.session_title.clone();
        self.activation = Activation::Pending(tokio::spawn(async move {
            client.create_conversation(&title).await
        }));
        debug!(name: "widget.session.requested", "Conversation creation dispatched");
        true
    }

    /// Show or hide the panel. Does not touch an in-flight send.
    pub fn toggle_open(&mut self) {
        self.state.is_open = !self.state.is_open;
    }

    pub fn update_input(&mut self, text: impl Into<String>) {
        self.state.pending_input = text.into();
    }

    /// Send the pending input.
    ///
    /// Silently does nothing (and returns `false`) while a reply is awaited,
    /// before a session exists, or when the input is blank.
    pub fn send_message(&mut self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        let Some(session_id) = self.state.session.clone() else {
            return false;
        };
        let content = trim_input(&self.state.pending_input);
        if content.is_empty() {
            return false;
        }
        let content = content.to_string();

        self.state.messages.push(Message::user(content.clone()));
        self.state.pending_input.clear();

        let client = Arc::clone(&self.client);
        self.in_flight = Some(tokio::spawn(async move {
            client.post_message(&session_id, &content).await
        }));
        true
    }

    /// Apply every finished task without waiting.
    pub fn poll_pending(&mut self) -> Vec<WidgetEvent> {
        let mut events = Vec::new();

        if let Activation::Pending(handle) = &mut self.activation {
            if let Some(joined) = handle.now_or_never() {
                self.activation = Activation::Resolved;
                events.push(self.resolve_session(joined));
            }
        }

        if let Some(handle) = self.in_flight.as_mut() {
            if let Some(joined) = handle.now_or_never() {
                self.in_flight = None;
                events.push(self.resolve_reply(joined));
            }
        }

        events
    }

    /// Wait for every outstanding task and apply it.
    ///
    /// Cancel-safe: if this future is dropped, unresolved tasks stay owned
    /// by the widget.
    pub async fn settle(&mut self) -> Vec<WidgetEvent> {
        let mut events = Vec::new();

        if let Activation::Pending(handle) = &mut self.activation {
            let joined = handle.await;
            self.activation = Activation::Resolved;
            events.push(self.resolve_session(joined));
        }

        if let Some(handle) = self.in_flight.as_mut() {
            let joined = handle.await;
            self.in_flight = None;
            events.push(self.resolve_reply(joined));
        }

        events
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────────

    fn resolve_session(
        &mut self,
        joined: Result<Result<CreateConversationResponse, ClientError>, JoinError>,
    ) -> WidgetEvent {
        match joined {
            Ok(Ok(response)) => {
                if let Some(id) = response.session_id() {
                    info!(
                        name: "widget.session.created",
                        session_id = %id,
                        "Conversation session established"
                    );
                    self.state.session = Some(id.clone());
                    return WidgetEvent::SessionEstablished(id);
                }
                warn!(name: "widget.session.failed", "Conversation response carried no session id");
            }
            Ok(Err(err)) => {
                warn!(name: "widget.session.failed", error = %err, "Failed to create conversation");
            }
            Err(err) => {
                warn!(
                    name: "widget.session.failed",
                    error = %err,
                    "Conversation task did not complete"
                );
            }
        }
        WidgetEvent::SessionFailed
    }

    fn resolve_reply(
        &mut self,
        joined: Result<Result<PostMessageResponse, ClientError>, JoinError>,
    ) -> WidgetEvent {
        let failure = match joined {
            Ok(Ok(reply)) => {
                return match reply.assistant_content() {
                    Some(content) => {
                        info!(
                            name: "widget.reply.received",
                            chars = content.chars().count(),
                            "Assistant reply received"
                        );
                        self.state.messages.push(Message::assistant(content));
                        WidgetEvent::ReplyAppended
                    }
                    None => {
                        debug!(name: "widget.reply.empty", "Reply carried no assistant content");
                        WidgetEvent::ReplyEmpty
                    }
                };
            }
            Ok(Err(err)) => err.to_string(),
            Err(err) => err.to_string(),
        };

        warn!(name: "widget.reply.failed", error = %failure, "Message send failed");
        self.state
            .messages
            .push(Message::assistant(self.config.fallback_message.clone()));
        WidgetEvent::ReplyFailed
    }
}
