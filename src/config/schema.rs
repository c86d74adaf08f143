//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! receiver. All types derive Serde traits so the config can also be
//! deserialized from a file or embedded in a larger document.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the webhook receiver.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Port the HTTP listener binds to.
    pub port: u16,

    /// Interface the HTTP listener binds to.
    pub host: String,

    /// How long shutdown waits for in-flight requests, in seconds.
    pub drain_grace_secs: u64,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            port: 1709,
            host: "0.0.0.0".to_string(),
            drain_grace_secs: 20,
        }
    }
}

impl ReceiverConfig {
    /// Full bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Drain grace as a [`Duration`].
    pub fn drain_grace(&self) -> Duration {
        Duration::from_secs(self.drain_grace_secs)
    }
}
