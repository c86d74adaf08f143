//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (controller.rs):
//!     Validated config → Bind listener → Spawn serve loop
//!
//! Shutdown (shutdown.rs + controller.rs):
//!     Trigger → Stop accepting → Drain in-flight requests → Exit
//!     Drain is bounded by a grace period; overruns abort the serve task
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Resolve the signal future → Caller triggers shutdown
//! ```
//!
//! # Design Decisions
//! - Shutdown is decoupled from signal delivery: anything holding the
//!   coordinator can trigger it, which is what the tests do
//! - Ordered shutdown: stop accept, drain, close
//! - State only moves forward: Running → Draining → Stopped

pub mod controller;
pub mod shutdown;
pub mod signals;

pub use controller::ServeError;
pub use controller::ServerController;
pub use controller::ServerState;
pub use controller::ShutdownOutcome;
pub use shutdown::Shutdown;
