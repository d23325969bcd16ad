//! HTTP API for the Journey travel journal.
//!
//! The server is a thin layer over [`journey_core::Journey`]: handlers
//! resolve the caller from the `Authorization` header, call one service
//! method and shape the JSON response. All trip rules (ordering, access,
//! compare-and-swap writes) live in the core crate.

use std::net::SocketAddr;

use tokio::net::TcpListener;

pub mod analytics;
pub mod args;
pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

/// Serves the API on `addr` until SIGINT or SIGTERM.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Journey API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Journey API shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        log::info!("Received SIGINT, shutting down gracefully...");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                log::info!("Received SIGTERM, shutting down gracefully...");
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {e}");
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
}
