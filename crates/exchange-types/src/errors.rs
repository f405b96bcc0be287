//! # Exchange Error Taxonomy
//!
//! One enum for every failure the exchange layer can report. The four
//! pipeline failures (`DecodingFailed`, `DecryptionFailed`,
//! `DeserializationFailed`, `EncryptionFailed`) are distinct and
//! non-overlapping: they drive different retry and escalation decisions
//! upstream, so callers must be able to tell them apart.
//!
//! `Business` is not a system failure: it is a successfully decoded
//! `ExchangeResult::Error` that the caller chose to raise one layer up.

use crate::envelope::ErrorEnvelope;
use exchange_crypto::CryptoError;
use thiserror::Error;

/// Errors reported by the exchange layer.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Caller misuse, failed fast before any I/O.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport framing is not valid Base64.
    #[error("Transport framing is not valid Base64: {0}")]
    DecodingFailed(#[from] base64::DecodeError),

    /// The crypto transform rejected the input.
    #[error("Decryption failed: {0}")]
    DecryptionFailed(#[from] CryptoError),

    /// Decrypted payload matches neither the success nor the error schema.
    /// The preview is truncated to bound log volume.
    #[error("Cannot deserialize payload as {target} or ErrorEnvelope (preview: {preview})")]
    DeserializationFailed {
        /// Name of the expected success schema.
        target: String,
        /// Lossy UTF-8 preview of the offending payload, at most 200 bytes.
        preview: String,
    },

    /// Any outbound pipeline failure (serialization or encryption).
    #[error("Encryption pipeline failed: {0}")]
    EncryptionFailed(String),

    /// Codec-level serialize/deserialize failure.
    #[error("Codec error: {0}")]
    Serialization(String),

    /// No codec profile registered under the requested name.
    #[error("Unknown codec profile: {0}")]
    UnknownProfile(String),

    /// A decoded business error raised by the caller.
    #[error("Business error {}: {}", .0.error_code, .0.message)]
    Business(ErrorEnvelope),

    /// Business-logic failure inside the listener.
    #[error("Handler failed: {0}")]
    Handler(String),

    /// A pipeline worker task failed to complete.
    #[error("Pipeline task failed: {0}")]
    Task(String),

    /// No reply arrived within the configured timeout.
    #[error("Timed out waiting for reply")]
    Timeout,

    /// The reply channel closed before a reply arrived.
    #[error("Reply channel closed before a reply arrived")]
    ChannelClosed,

    /// The reply envelope carried no payload.
    #[error("Reply envelope carried no payload")]
    EmptyReply,
}
