//! Embeddable chat widget
//!
//! A chat widget that opens a conversation with a collaborator server on page
//! load, relays visitor messages to it and renders the exchange.
//!
//! # Architecture
//!
//! - **Widget**: explicit state machine built from an injected client and config
//! - **Client**: the collaborator's conversation API behind a trait
//! - **UI**: pure HTML rendering of widget state, driven by htmx
//! - **Host**: Axum routes mounting one widget per page load
//!
//! # Modules
//!
//! - [`widget`]: widget state and operations
//! - [`client`]: collaborator client trait and HTTP implementation
//! - [`ui`]: widget fragment and hosting page rendering
//! - [`host`]: widget registry and routes
//! - [`config`]: layered configuration

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod config;
pub mod host;
pub mod server;
pub mod ui;
pub mod widget;

use crate::client::ConversationClient;
use crate::config::AppConfig;
use crate::widget::WidgetConfig;

use host::WidgetRegistry;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Global Configuration
    pub config: Arc<AppConfig>,
    /// Strings and tuning handed to every widget.
    pub widget_config: Arc<WidgetConfig>,
    /// Collaborator client shared by all widgets.
    pub client: Arc<dyn ConversationClient>,
    /// Widgets mounted by page loads.
    pub widgets: WidgetRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, client: Arc<dyn ConversationClient>) -> Self {
        let widget_config = Arc::new(config.widget.clone());
        Self {
            config,
            widget_config,
            client,
            widgets: WidgetRegistry::new(),
        }
    }
}
