//! HTML rendering.
//!
//! Rendering is a pure function of a [`WidgetView`](crate::widget::WidgetView)
//! plus the injected [`WidgetConfig`](crate::widget::WidgetConfig). The
//! markup drives the host routes through htmx attributes.
//!
//! - [`render_widget`]: the widget container fragment
//! - [`render_page`]: the hosting document

mod page;
mod widget;

pub use page::render_page;
pub use widget::render_widget;

/// Escape text for use in element content and quoted attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
