//! Widget fragment.

use std::fmt::Write;

use super::escape;
use crate::widget::{WidgetConfig, WidgetView};

/// Render the widget container for the widget mounted as `page_id`.
///
/// Every interaction swaps this container (`outerHTML`). While a reply is
/// awaited the container polls `GET /widget/{page_id}` until it resolves.
#[must_use]
pub fn render_widget(view: &WidgetView<'_>, config: &WidgetConfig, page_id: &str) -> String {
    let base = format!("/widget/{}", escape(page_id));
    let mut html = String::new();

    let polling = if view.is_awaiting_reply {
        format!(
            r#" hx-get="{base}" hx-trigger="every {}ms""#,
            config.poll_interval_ms
        )
    } else {
        String::new()
    };

    let _ = write!(
        html,
        r#"<div id="chat-widget" class="widget-container" hx-target="this" hx-swap="outerHTML"{polling}>"#
    );
    let _ = write!(
        html,
        r#"<button class="widget-button" hx-post="{base}/toggle" title="{}">{}</button>"#,
        escape(&config.toggle_title),
        if view.is_open { "✕" } else { "💬" }
    );

    if view.is_open {
        render_panel(&mut html, view, config, &base);
    }

    html.push_str("</div>");
    html
}

fn render_panel(html: &mut String, view: &WidgetView<'_>, config: &WidgetConfig, base: &str) {
    html.push_str(r#"<div class="chat-panel">"#);
    let _ = write!(
        html,
        r#"<div class="chat-header">{}</div>"#,
        escape(&config.header_title)
    );

    html.push_str(r#"<div class="chat-messages" aria-live="polite">"#);
    if view.messages.is_empty() {
        let _ = write!(
            html,
            r#"<div class="welcome-message">{}</div>"#,
            escape(&config.welcome_message)
        );
    }
    for message in view.messages {
        let _ = write!(
            html,
            r#"<div class="message {}">{}</div>"#,
            message.role().as_str(),
            escape(message.content())
        );
    }
    if view.is_awaiting_reply {
        let _ = write!(
            html,
            r#"<div class="message assistant typing">{}</div>"#,
            escape(&config.typing_indicator)
        );
    }
    html.push_str("</div>");

    let disabled = if view.is_awaiting_reply { " disabled" } else { "" };
    let _ = write!(html, r#"<form class="chat-input" hx-post="{base}/send">"#);
    let _ = write!(
        html,
        r#"<input type="text" name="message" autocomplete="off" placeholder="{}" value="{}" hx-post="{base}/input" hx-trigger="keyup changed delay:250ms" hx-swap="none"{disabled}>"#,
        escape(&config.placeholder),
        escape(view.pending_input)
    );
    let _ = write!(
        html,
        r#"<button class="send-button" type="submit"{disabled}>{}</button>"#,
        escape(&config.send_label)
    );
    html.push_str("</form></div>");
}
