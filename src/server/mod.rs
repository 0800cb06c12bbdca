//! HTTP server

pub mod routes;
pub mod state;

pub use routes::{router, ApiError, BANNER};
pub use state::AppState;

use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// `addr` で待ち受け、Ctrl+Cで停止するまで処理する
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind {}: {}", addr, e)))?;
    info!("Server running on http://{}", listener
        .local_addr()
        .map_err(|e| Error::Config(format!("Failed to read local address: {}", e)))?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
