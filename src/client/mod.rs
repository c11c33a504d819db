//! Client side of the collaborator conversation API.
//!
//! The widget never talks HTTP directly; it is handed an
//! `Arc<dyn ConversationClient>` so tests can substitute a fake.
//!
//! - [`ConversationClient`]: the two calls the widget depends on
//! - [`HttpConversationClient`]: reqwest implementation
//! - [`types`]: wire DTOs

pub mod error;
pub mod http;
pub mod types;

pub use error::{ClientError, Result};
pub use http::HttpConversationClient;
pub use types::{CreateConversationResponse, PostMessageResponse, SessionId};

use async_trait::async_trait;

/// Conversation endpoints provided by the collaborator server.
#[async_trait]
pub trait ConversationClient: Send + Sync {
    /// `POST /api/conversations`.
    async fn create_conversation(&self, title: &str) -> Result<CreateConversationResponse>;

    /// `POST /api/conversations/{session_id}/messages`.
    ///
    /// A success response whose body carries no usable content is still
    /// `Ok`; only transport failures and non-success statuses are errors.
    async fn post_message(
        &self,
        session_id: &SessionId,
        content: &str,
    ) -> Result<PostMessageResponse>;
}
