//! HTTP routes backing the rendered widget.

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use super::WidgetHandle;
use crate::AppState;
use crate::ui::{render_page, render_widget};
use crate::widget::ChatWidget;

/// Build the router for the widget host.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Hosting page
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        // Widget events
        .route("/widget/{id}", get(widget_handler))
        .route("/widget/{id}/toggle", post(toggle_handler))
        .route("/widget/{id}/input", post(input_handler))
        .route("/widget/{id}/send", post(send_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Form body posted by the input field and the send form.
#[derive(Debug, Deserialize)]
struct MessageForm {
    #[serde(default)]
    message: String,
}

type FragmentResult = Result<Html<String>, StatusCode>;

fn lookup(state: &AppState, id: &str) -> Result<WidgetHandle, StatusCode> {
    state.widgets.get(id).ok_or_else(|| {
        debug!(page_id = %id, "Unknown or expired widget");
        StatusCode::NOT_FOUND
    })
}

fn fragment(state: &AppState, handle: &WidgetHandle, widget: &ChatWidget) -> Html<String> {
    Html(render_widget(&widget.view(), &state.widget_config, handle.id()))
}

/// Apply finished requests and log what they changed.
fn apply_pending(handle: &WidgetHandle, widget: &mut ChatWidget) {
    for event in widget.poll_pending() {
        info!(
            name: "host.widget.resolved",
            page_id = %handle.id(),
            event = event.name(),
            "Widget request resolved"
        );
    }
}

/// GET / - Page load: mount and activate a fresh widget.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let mut widget = ChatWidget::new(
        Arc::clone(&state.client),
        Arc::clone(&state.widget_config),
    );
    widget.activate();

    let handle = state.widgets.mount(widget);
    info!(
        name: "host.widget.mounted",
        page_id = %handle.id(),
        mounted = state.widgets.len(),
        "Widget mounted"
    );

    let widget = handle.lock().await;
    let Html(widget_html) = fragment(&state, &handle, &widget);
    Html(render_page(&widget_html, &state.widget_config))
}

/// GET /health - Liveness check.
async fn health_handler() -> &'static str {
    "ok"
}

/// GET /widget/:id - Apply finished requests and re-render.
async fn widget_handler(State(state): State<AppState>, Path(id): Path<String>) -> FragmentResult {
    let handle = lookup(&state, &id)?;
    let mut widget = handle.lock().await;
    apply_pending(&handle, &mut widget);
    Ok(fragment(&state, &handle, &widget))
}

/// POST /widget/:id/toggle - Show or hide the panel.
async fn toggle_handler(State(state): State<AppState>, Path(id): Path<String>) -> FragmentResult {
    let handle = lookup(&state, &id)?;
    let mut widget = handle.lock().await;
    widget.toggle_open();
    apply_pending(&handle, &mut widget);
    Ok(fragment(&state, &handle, &widget))
}

/// POST /widget/:id/input - Record the input field's value.
async fn input_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> StatusCode {
    match lookup(&state, &id) {
        Ok(handle) => {
            handle.lock().await.update_input(form.message);
            StatusCode::NO_CONTENT
        }
        Err(status) => status,
    }
}

/// POST /widget/:id/send - Send the submitted message.
async fn send_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MessageForm>,
) -> FragmentResult {
    let handle = lookup(&state, &id)?;
    let mut widget = handle.lock().await;
    apply_pending(&handle, &mut widget);
    widget.update_input(form.message);
    if !widget.send_message() {
        debug!(page_id = %id, "Send ignored");
    }
    Ok(fragment(&state, &handle, &widget))
}
