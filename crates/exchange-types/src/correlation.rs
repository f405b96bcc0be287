//! Correlation identifier for request/reply matching.
//!
//! An opaque per-request token used only for logging, tracing, and reply
//! routing. A delivery may arrive without one; that case is represented
//! explicitly as [`CorrelationId::unknown`] rather than an empty string
//! scattered through log statements.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Placeholder for deliveries that arrived without a correlation identifier.
const UNKNOWN: &str = "[unknown]";

/// Opaque correlation identifier accompanying each request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh correlation identifier (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The placeholder identifier for deliveries that carried none.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_string())
    }

    /// Wrap an identifier received from the transport, falling back to the
    /// unknown placeholder when the transport delivered none.
    #[must_use]
    pub fn from_transport(id: Option<String>) -> Self {
        match id {
            Some(id) if !id.is_empty() => Self(id),
            _ => Self::unknown(),
        }
    }

    /// Whether this is the unknown placeholder.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CorrelationId {
    fn from(id: String) -> Self {
        Self::from_transport(Some(id))
    }
}

impl From<&str> for CorrelationId {
    fn from(id: &str) -> Self {
        Self::from_transport(Some(id.to_string()))
    }
}
