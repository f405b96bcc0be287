//! Exchange configuration with validation.

use crate::listener::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration for the exchange listener and client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// How long the client waits for a correlated reply.
    pub request_timeout: Duration,
    /// What the listener does when a request cannot produce a reply.
    pub failure_policy: FailurePolicy,
    /// Maximum concurrently processed deliveries; admission beyond this
    /// queues FIFO for backpressure.
    pub max_in_flight: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            failure_policy: FailurePolicy::Silent,
            max_in_flight: 64,
        }
    }
}

impl ExchangeConfig {
    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::ZeroInFlight);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `request_timeout` cannot be zero.
    #[error("request_timeout cannot be zero")]
    ZeroTimeout,

    /// `max_in_flight` cannot be zero.
    #[error("max_in_flight cannot be zero")]
    ZeroInFlight,
}
