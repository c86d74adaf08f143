//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT)
//! - Translate signal delivery into a plain future the caller can race
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The future only reports the signal; deciding what to do with it
//!   stays with the caller

/// Resolve when the process is asked to terminate.
///
/// Listens for Ctrl+C everywhere and additionally SIGTERM on Unix, the
/// signal container runtimes send first.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received interrupt signal"),
        _ = terminate => tracing::info!("received terminate signal"),
    }
}
