//! OS signal handling.
//!
//! Translates SIGINT (Ctrl+C) and SIGTERM into the internal shutdown
//! signal so the server drains instead of dying mid-request.

use crate::lifecycle::shutdown::Shutdown;

/// Wait for a termination signal, then trigger shutdown.
///
/// Intended to be spawned as a background task at startup.
pub async fn watch(shutdown: Shutdown) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    shutdown.trigger();
}
