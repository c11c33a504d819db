use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::AppState;
use crate::client::{ConversationClient, HttpConversationClient};
use crate::config::AppConfig;
use crate::host::{WidgetRegistry, router};

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let client: Arc<dyn ConversationClient> =
        Arc::new(HttpConversationClient::new(&config.collaborator.base_url)?);
    info!(
        name: "collaborator.config.loaded",
        base_url = %config.collaborator.base_url,
        "Collaborator configuration loaded"
    );

    let state = AppState::new(Arc::clone(&config), client);
    spawn_idle_sweeper(state.widgets.clone(), &config);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address).await?;

    info!(
        name: "server.started",
        address = %address,
        "Server started"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Periodically drop widgets whose page has gone quiet.
fn spawn_idle_sweeper(widgets: WidgetRegistry, config: &AppConfig) {
    let idle_timeout = config.registry.idle_timeout();
    let mut interval = tokio::time::interval(config.registry.cleanup_interval());

    tokio::spawn(async move {
        loop {
            interval.tick().await;
            let removed = widgets.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                info!(
                    name: "host.widget.expired",
                    removed,
                    remaining = widgets.len(),
                    "Idle widgets removed"
                );
            }
        }
    });
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!(name: "server.shutdown", "Shutdown signal received");
}
