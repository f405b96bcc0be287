//! # Transport Envelope and Result Model
//!
//! The single-field envelope that carries Base64 ciphertext over the wire,
//! the structured business-error shape, and the two-variant result type
//! produced by the decode pipeline.
//!
//! The wire format is an untagged union: the same decrypted byte stream may
//! represent either a domain value or a business error, distinguishable only
//! by which schema it satisfies. [`ExchangeResult`] reproduces that union as
//! an explicit tagged sum so every consumer must match both outcomes.

use crate::errors::ExchangeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The transport envelope: one string field holding Base64-encoded
/// ciphertext.
///
/// Absence of the `data` field on the wire means "no payload", never
/// "empty success"; the transport binding models that case as an absent
/// delivery payload before an envelope is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEnvelope {
    /// Base64-encoded ciphertext.
    pub data: String,
}

impl TransportEnvelope {
    /// Wrap an already-encoded transport string.
    #[must_use]
    pub fn new(data: String) -> Self {
        Self { data }
    }
}

/// Structured business error carried inside an encrypted payload.
///
/// Field names on the wire follow the codec profile in use; under the
/// external camelCase profile this is `errorCode` / `message` / `details`.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Machine-readable error code.
    pub error_code: String,
    /// Human-readable message.
    pub message: String,
    /// Arbitrary supplementary detail fields.
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl ErrorEnvelope {
    /// Create an envelope with no detail fields.
    #[must_use]
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Map::new(),
        }
    }

    /// Create an envelope with detail fields.
    #[must_use]
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: Map<String, Value>,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details,
        }
    }
}

/// Outcome of decoding an encrypted reply: exactly one of a typed success
/// payload or a structured business error.
///
/// Created only by the decode pipeline; consumed and discarded within one
/// request's scope. Which parse attempt produced the value is never exposed
/// as a third state.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ExchangeResult<T> {
    /// Decrypted bytes parsed as the expected success schema.
    Success(T),
    /// Decrypted bytes parsed as the fallback error schema.
    Error(ErrorEnvelope),
}

impl<T> ExchangeResult<T> {
    /// Whether this is the success variant.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether this is the error variant.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The success payload, if present.
    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// The error envelope, if present.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorEnvelope> {
        match self {
            Self::Success(_) => None,
            Self::Error(envelope) => Some(envelope),
        }
    }

    /// Consume the result, yielding the success payload.
    #[must_use]
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Consume the result, raising the error variant as
    /// [`ExchangeError::Business`].
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Business`] when the payload was a business
    /// error.
    pub fn into_result(self) -> Result<T, ExchangeError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Error(envelope) => Err(ExchangeError::Business(envelope)),
        }
    }
}
