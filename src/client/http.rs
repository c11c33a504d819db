//! reqwest-backed [`ConversationClient`].

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use super::ConversationClient;
use super::error::{ClientError, Result};
use super::types::{
    CreateConversationRequest, CreateConversationResponse, PostMessageRequest,
    PostMessageResponse, SessionId,
};

/// HTTP client for the collaborator server.
///
/// # Example
///
/// ```rust,no_run
/// use chat_widget::client::{ConversationClient, HttpConversationClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpConversationClient::new("http://localhost:5000")?;
/// let created = client.create_conversation("AI Chat Session").await?;
/// if let Some(id) = created.session_id() {
///     client.post_message(&id, "Hello!").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpConversationClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpConversationClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The collaborator's base URL (e.g., "http://localhost:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base_url, http })
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".into());
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ConversationClient for HttpConversationClient {
    async fn create_conversation(&self, title: &str) -> Result<CreateConversationResponse> {
        let response = self
            .http
            .post(self.endpoint(&["api", "conversations"])?)
            .json(&CreateConversationRequest { title })
            .send()
            .await?;
        let body = Self::error_for_status(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_message(
        &self,
        session_id: &SessionId,
        content: &str,
    ) -> Result<PostMessageResponse> {
        let url = self.endpoint(&["api", "conversations", session_id.as_str(), "messages"])?;
        let response = self
            .http
            .post(url)
            .json(&PostMessageRequest { content })
            .send()
            .await?;
        let body = Self::error_for_status(response).await?.text().await?;

        match serde_json::from_str(&body) {
            Ok(reply) => Ok(reply),
            Err(err) => {
                warn!(
                    name: "client.reply.malformed",
                    session_id = %session_id,
                    error = %err,
                    "Reply body is not a usable message payload"
                );
                Ok(PostMessageResponse::default())
            }
        }
    }
}
