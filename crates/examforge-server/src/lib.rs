//! Examforge HTTP server.
//!
//! Exposes the generation pipeline over three endpoints:
//! - `POST /api/upload` — source material + config in, LaTeX document out
//! - `POST /api/render` — document in, compiled PDF out (solutions optional)
//! - `POST /api/export` — document in, raw `.tex` out (toolchain-independent)
//!
//! Requests are independent; the only shared state is the provider client
//! and the typesetting driver configuration. Each render owns a private
//! scratch directory, so no locking is needed across requests.

pub mod error;
pub mod extract;
pub mod pipeline;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

pub use error::{ApiError, ApiResult};
pub use pipeline::SourceExport;
pub use routes::{AppState, ExportRequest, RenderRequest, UploadResponse, create_router};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Start the Examforge server.
///
/// Runs until Ctrl+C, then shuts down gracefully.
pub async fn serve(state: Arc<AppState>, config: ServerConfig) -> ApiResult<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| {
            ApiError::BadRequest(format!("invalid address: {}:{}", config.host, config.port))
        })?;

    tracing::info!("Starting Examforge server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
