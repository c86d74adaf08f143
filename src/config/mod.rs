//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (--port)
//!     → schema.rs (ReceiverConfig, defaults filled in)
//!     → validation.rs (semantic checks)
//!     → ReceiverConfig (validated, immutable)
//!     → passed by value to the lifecycle controller
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup and never mutated afterwards
//! - All fields have defaults so callers only set what they care about
//! - Validation separates syntactic (clap/serde) from semantic checks

pub mod schema;
pub mod validation;

pub use schema::ReceiverConfig;
pub use validation::validate_config;
pub use validation::ValidationError;
