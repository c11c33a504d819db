//! Fixed strings and tuning knobs injected into every widget.

use serde::Deserialize;

/// Widget configuration.
///
/// Every field has a default, so a partial `widget:` section in the
/// config file only overrides what it names.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WidgetConfig {
    /// Title sent when creating the conversation.
    pub session_title: String,
    /// Assistant message appended when a send fails.
    pub fallback_message: String,
    /// Panel header text.
    pub header_title: String,
    /// Shown while the transcript is empty.
    pub welcome_message: String,
    /// Input placeholder.
    pub placeholder: String,
    /// Shown while a reply is awaited.
    pub typing_indicator: String,
    /// Tooltip of the toggle button.
    pub toggle_title: String,
    /// Label of the send button.
    pub send_label: String,
    /// `<title>` of the hosting page.
    pub page_title: String,
    /// How often an awaiting widget polls for its reply.
    pub poll_interval_ms: u64,
    /// Where the hosting page loads htmx from.
    pub htmx_src: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            session_title: "AI Chat Session".to_string(),
            fallback_message: "Sorry, I had trouble processing your message. Please try again."
                .to_string(),
            header_title: "Shop Twist & Thread Assistant".to_string(),
            welcome_message: "Hi! I'm here to help with questions about our custom sewing \
                              services, Class of 2026 collection, and order information."
                .to_string(),
            placeholder: "Ask me anything...".to_string(),
            typing_indicator: "Typing...".to_string(),
            toggle_title: "Chat with AI Assistant".to_string(),
            send_label: "Send".to_string(),
            page_title: "AI Chat Widget - Shop Twist and Thread".to_string(),
            poll_interval_ms: 500,
            htmx_src: "https://unpkg.com/htmx.org@2.0.8".to_string(),
        }
    }
}
