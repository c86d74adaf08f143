//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap/serde handle syntactic)
//! - Validate value ranges (port non-zero, grace period > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ReceiverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::IpAddr;

use thiserror::Error;

use super::schema::ReceiverConfig;

/// A single semantic problem found in a [`ReceiverConfig`].
///
/// The `Display` text is what the operator sees on stdout, so it stays
/// short and actionable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Port 0 means the operator never chose a port; refuse to guess one.
    #[error("must supply --port")]
    MissingPort,

    /// Bind host must be an IP literal, hostnames are not resolved.
    #[error("invalid bind host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    /// A zero grace period would abandon every in-flight request.
    #[error("drain grace period must be greater than zero seconds")]
    ZeroDrainGrace,
}

/// Check a config for semantic problems, collecting every error found.
pub fn validate_config(config: &ReceiverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.port == 0 {
        errors.push(ValidationError::MissingPort);
    }

    if let Err(err) = config.host.parse::<IpAddr>() {
        errors.push(ValidationError::InvalidHost {
            host: config.host.clone(),
            reason: err.to_string(),
        });
    }

    if config.drain_grace_secs == 0 {
        errors.push(ValidationError::ZeroDrainGrace);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
