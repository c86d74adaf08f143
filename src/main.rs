//! Webhook Sink
//!
//! An HTTP receiver that accepts webhook-style POST requests, traces
//! their headers and body, and acknowledges receipt.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 WEBHOOK SINK                  │
//!                     │                                               │
//!     POST /          │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!     ────────────────┼─▶│  http   │───▶│ handlers │───▶│ receipt  │  │
//!                     │  │ server  │    │POST-only │    │  traces  │  │
//!     ◀───────────────┼──│         │    └──────────┘    └──────────┘  │
//!     200 / 400 / 404 │  └─────────┘                                  │
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐  │
//!                     │  │           Cross-Cutting Concerns        │  │
//!                     │  │  ┌────────┐  ┌─────────────────────────┐│  │
//!                     │  │  │ config │  │ lifecycle               ││  │
//!                     │  │  │        │  │ bind / drain / stop     ││  │
//!                     │  │  └────────┘  └─────────────────────────┘│  │
//!                     │  └─────────────────────────────────────────┘  │
//!                     └───────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webhook_sink::config::{validate_config, ReceiverConfig};
use webhook_sink::lifecycle::{signals, ServeError, ServerController, ShutdownOutcome};

#[derive(Parser)]
#[command(name = "webhook-sink")]
#[command(about = "HTTP receiver that logs inbound webhook posts", long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 1709)]
    port: u16,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ReceiverConfig {
        port: cli.port,
        ..ReceiverConfig::default()
    };

    // Config problems go to stdout, before tracing exists.
    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            println!("{error}");
        }
        return ExitCode::FAILURE;
    }

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,webhook_sink=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "webhook receiver exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ReceiverConfig) -> Result<(), ServeError> {
    let port = config.port;
    let grace = config.drain_grace();

    let mut controller = ServerController::bind(config).await?;
    tracing::info!("Serving http on : {}", port);

    let early_exit = tokio::select! {
        () = signals::shutdown_signal() => None,
        result = controller.finished() => Some(result),
    };

    match early_exit {
        // Serve loop ended without a shutdown request; surface whatever
        // took it down.
        Some(result) => result,
        None => {
            let outcome = controller.stop(grace).await?;
            if outcome == ShutdownOutcome::TimedOut {
                tracing::warn!("exiting with requests still in flight");
            }
            Ok(())
        }
    }
}
