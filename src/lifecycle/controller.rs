//! Server lifecycle control.
//!
//! # Responsibilities
//! - Bind the listener and spawn the serve loop
//! - Offer one place to request shutdown and await the drain
//! - Publish lifecycle state for observers
//!
//! # Design Decisions
//! - Bind errors surface here, before any task is spawned
//! - The serve task's `JoinHandle` is the single join point for both
//!   orderly shutdown and unexpected server death, and it is joined at
//!   most once; `stop` after the loop has already ended drains nothing
//! - Drain is bounded: once the grace period elapses the serve task is
//!   aborted rather than waited on forever

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::config::ReceiverConfig;
use crate::http::HttpServer;

use super::shutdown::Shutdown;

/// Lifecycle state of the receiver, published on a watch channel.
///
/// Transitions are monotonic; observers never see an earlier state
/// after a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Listener bound, requests being served.
    Running,
    /// Shutdown requested; in-flight requests finishing, new
    /// connections refused.
    Draining,
    /// Serve loop has exited, cleanly or not.
    Stopped,
}

/// How a bounded drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All in-flight requests completed within the grace period.
    Drained,
    /// The grace period elapsed first and the serve task was aborted.
    TimedOut,
}

/// Errors from binding or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The configured address could not be parsed or bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    /// The serve loop returned an error.
    #[error("http server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The serve task panicked or was cancelled out from under us.
    #[error("server task failed: {0}")]
    Join(#[from] JoinError),
}

/// Handle owning a running webhook receiver.
///
/// Created by [`ServerController::bind`]; from that point the serve
/// loop runs on its own task. Dropping the controller detaches that
/// task, so call [`stop`](Self::stop) for an orderly exit.
pub struct ServerController {
    local_addr: SocketAddr,
    shutdown: Shutdown,
    state_tx: watch::Sender<ServerState>,
    // None once the serve task has been joined.
    serve: Option<JoinHandle<Result<(), std::io::Error>>>,
}

impl ServerController {
    /// Bind the listener and start serving.
    ///
    /// Once this returns the listener is accepting connections; bind
    /// and address errors are reported before anything is spawned.
    pub async fn bind(config: ReceiverConfig) -> Result<Self, ServeError> {
        let addr: SocketAddr = config.bind_address().parse().map_err(|err| {
            ServeError::Bind(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address: {err}"),
            ))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ServeError::Bind)?;
        let local_addr = listener.local_addr().map_err(ServeError::Bind)?;

        let shutdown = Shutdown::new();
        let (state_tx, _) = watch::channel(ServerState::Running);

        let server = HttpServer::new();
        let serve = tokio::spawn(server.run(listener, shutdown.subscribe()));

        tracing::info!(address = %local_addr, "webhook receiver started");

        Ok(Self {
            local_addr,
            shutdown,
            state_tx,
            serve: Some(serve),
        })
    }

    /// Address the listener actually bound. Resolves port 0 binds to
    /// the ephemeral port the OS picked.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shutdown coordinator for this server, for wiring into signal
    /// handlers or tests.
    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Watch channel following the lifecycle state.
    pub fn state(&self) -> watch::Receiver<ServerState> {
        self.state_tx.subscribe()
    }

    /// Wait for the serve loop to end on its own.
    ///
    /// Resolves early only when the server dies without a shutdown
    /// request, typically a listener failure. Cancel safe, so it can
    /// be raced against a signal future. Once the task has been joined
    /// this never resolves again.
    pub async fn finished(&mut self) -> Result<(), ServeError> {
        match self.serve.as_mut() {
            Some(serve) => {
                let result = join_outcome(serve.await);
                self.serve = None;
                self.state_tx.send_replace(ServerState::Stopped);
                result
            }
            None => std::future::pending().await,
        }
    }

    /// Request shutdown and wait up to `grace` for in-flight requests.
    ///
    /// The listener stops accepting as soon as the shutdown broadcast
    /// lands. If the drain outlives the grace period the serve task is
    /// aborted and [`ShutdownOutcome::TimedOut`] is returned; requests
    /// still open at that point are dropped. If the serve loop already
    /// ended there is nothing to drain and the outcome is `Drained`.
    pub async fn stop(mut self, grace: Duration) -> Result<ShutdownOutcome, ServeError> {
        let outcome = match self.serve.take() {
            Some(mut serve) => {
                self.shutdown.trigger();
                self.state_tx.send_replace(ServerState::Draining);

                match tokio::time::timeout(grace, &mut serve).await {
                    Ok(join) => join_outcome(join).map(|()| ShutdownOutcome::Drained),
                    Err(_) => {
                        tracing::warn!(
                            grace_secs = grace.as_secs(),
                            "failed to shutdown http server: grace period elapsed with requests in flight"
                        );
                        serve.abort();
                        Ok(ShutdownOutcome::TimedOut)
                    }
                }
            }
            // Already joined via `finished`; the state stays Stopped.
            None => Ok(ShutdownOutcome::Drained),
        };

        self.state_tx.send_replace(ServerState::Stopped);
        outcome
    }
}

fn join_outcome(join: Result<Result<(), std::io::Error>, JoinError>) -> Result<(), ServeError> {
    match join {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(ServeError::Serve(err)),
        Err(err) => Err(ServeError::Join(err)),
    }
}
