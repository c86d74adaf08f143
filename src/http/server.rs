//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing)
//! - Serve connections until shutdown, then drain
//!
//! # Design Decisions
//! - The router is built by a free function so tests can drive it
//!   without binding a listener
//! - Shutdown arrives on a broadcast receiver owned by the lifecycle
//!   controller, never from a signal handler inside the server

use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use super::handlers;

/// Build the Axum router with all middleware layers.
pub fn create_router() -> Router {
    Router::new()
        .route("/", any(handlers::receive_webhook))
        .fallback(handlers::unknown_path)
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the webhook receiver.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new() -> Self {
        Self {
            router: create_router(),
        }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once the shutdown broadcast lands and every in-flight
    /// request has completed. The bounded part of the drain lives in
    /// the lifecycle controller, not here.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("http server is shutting down");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
