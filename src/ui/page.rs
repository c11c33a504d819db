//! Hosting page.

use super::escape;
use crate::widget::WidgetConfig;

const WIDGET_STYLES: &str = r"
    .widget-container {
        position: fixed;
        bottom: 20px;
        right: 20px;
        z-index: 9999;
        font-family: system-ui, -apple-system, sans-serif;
    }
    .widget-button {
        width: 60px;
        height: 60px;
        border-radius: 50%;
        background: linear-gradient(135deg, #4f46e5, #7c3aed);
        color: white;
        border: none;
        cursor: pointer;
        display: flex;
        align-items: center;
        justify-content: center;
        font-size: 24px;
        box-shadow: 0 4px 12px rgba(0,0,0,0.15);
        transition: transform 0.2s;
    }
    .widget-button:hover { transform: scale(1.05); }
    .chat-panel {
        position: absolute;
        bottom: 80px;
        right: 0;
        width: 350px;
        height: 500px;
        background: white;
        border-radius: 12px;
        box-shadow: 0 10px 40px rgba(0,0,0,0.1);
        border: 1px solid #e5e7eb;
        display: flex;
        flex-direction: column;
        overflow: hidden;
    }
    .chat-header {
        background: linear-gradient(135deg, #4f46e5, #7c3aed);
        color: white;
        padding: 16px;
        font-weight: 600;
    }
    .chat-messages {
        flex: 1;
        padding: 16px;
        overflow-y: auto;
        background: #f9fafb;
    }
    .message {
        margin-bottom: 12px;
        padding: 10px 14px;
        border-radius: 12px;
        max-width: 85%;
        word-wrap: break-word;
    }
    .message.user { background: #4f46e5; color: white; margin-left: auto; }
    .message.assistant { background: white; border: 1px solid #e5e7eb; }
    .message.typing { color: #6b7280; font-style: italic; }
    .chat-input {
        border-top: 1px solid #e5e7eb;
        padding: 16px;
        background: white;
        display: flex;
        gap: 8px;
    }
    .chat-input input {
        flex: 1;
        border: 1px solid #d1d5db;
        border-radius: 8px;
        padding: 10px 12px;
        outline: none;
        font-size: 14px;
    }
    .chat-input input:focus { border-color: #4f46e5; }
    .send-button {
        background: #4f46e5;
        color: white;
        border: none;
        border-radius: 8px;
        padding: 10px 16px;
        cursor: pointer;
        font-weight: 500;
    }
    .send-button:disabled { opacity: 0.5; }
    .welcome-message {
        text-align: center;
        color: #6b7280;
        margin: 20px 0;
        font-size: 14px;
    }
";

/// Wrap a rendered widget fragment in a complete HTML document.
#[must_use]
pub fn render_page(widget_html: &str, config: &WidgetConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{htmx}"></script>
    <style>{WIDGET_STYLES}</style>
</head>
<body>
    {widget_html}
</body>
</html>"#,
        title = escape(&config.page_title),
        htmx = escape(&config.htmx_src),
    )
}
