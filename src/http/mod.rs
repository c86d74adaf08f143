//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown wiring)
//!     → handlers.rs (method check, payload read, receipt trace)
//!     → acknowledgement to client
//! ```

pub mod handlers;
pub mod server;

pub use server::create_router;
pub use server::HttpServer;
