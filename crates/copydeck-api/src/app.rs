//! Application builder and server loop.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM.
pub async fn run_server(state: AppState) -> AppResult<()> {
    let server = state.config.server.clone();
    let addr = format!("{}:{}", server.host, server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(
        address = %addr,
        drive = state.store.provider_type(),
        workspace = %state.config.drive.workspace_id,
        "CopyDeck server listening"
    );

    let grace = Duration::from_secs(server.shutdown_grace_seconds);
    let app = build_app(state);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });
    let mut serving = tokio::spawn(async move { serve.await });

    tokio::select! {
        joined = &mut serving => return joined_result(joined),
        _ = shutdown_rx.changed() => {}
    }

    // In-flight requests get `grace` to finish once the signal fired.
    let result = match tokio::time::timeout(grace, &mut serving).await {
        Ok(joined) => joined_result(joined),
        Err(_) => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, aborting");
            serving.abort();
            Ok(())
        }
    };

    info!("CopyDeck server stopped");
    result
}

fn joined_result(joined: Result<std::io::Result<()>, tokio::task::JoinError>) -> AppResult<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
