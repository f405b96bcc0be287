//! # Encode Pipeline
//!
//! Serialize → encrypt → Base64-encode a plain value into a transport
//! string under a caller-supplied codec profile.
//!
//! The cipher step may be expensive, so it runs on the blocking pool: many
//! encodes proceed concurrently, and a caller that goes away leaves the
//! in-flight step to finish and be discarded rather than dangling.

use crate::codec::CodecProfile;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use exchange_crypto::CryptoTransform;
use exchange_types::{ExchangeError, TransportEnvelope};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Outbound pipeline: plain value to Base64-framed ciphertext.
#[derive(Clone)]
pub struct EncodePipeline {
    transform: Arc<dyn CryptoTransform>,
}

impl EncodePipeline {
    /// Create a pipeline over a shared crypto transform.
    #[must_use]
    pub fn new(transform: Arc<dyn CryptoTransform>) -> Self {
        Self { transform }
    }

    /// Serialize, encrypt, and Base64-encode `value` under `profile`.
    ///
    /// Every failure on this path is reported as a single
    /// [`ExchangeError::EncryptionFailed`] wrapping the cause; no partial
    /// output is ever returned.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::EncryptionFailed`] on any serialization or
    /// encryption failure.
    pub async fn encode<T: Serialize>(
        &self,
        value: &T,
        profile: CodecProfile,
    ) -> Result<String, ExchangeError> {
        let plaintext = profile
            .serialize(value)
            .map_err(|e| ExchangeError::EncryptionFailed(e.to_string()))?;
        debug!(
            bytes = plaintext.len(),
            profile = profile.name,
            "serialized outbound payload"
        );

        let transform = Arc::clone(&self.transform);
        let encoded = tokio::task::spawn_blocking(move || {
            let ciphertext = transform
                .encrypt(&plaintext)
                .map_err(|e| ExchangeError::EncryptionFailed(e.to_string()))?;
            Ok::<String, ExchangeError>(BASE64.encode(ciphertext))
        })
        .await
        .map_err(|e| ExchangeError::EncryptionFailed(format!("encode task failed: {e}")))?
        .inspect_err(|e| error!(error = %e, "encryption pipeline failed"))?;

        Ok(encoded)
    }

    /// [`Self::encode`] wrapped into a [`TransportEnvelope`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::encode`].
    pub async fn encode_envelope<T: Serialize>(
        &self,
        value: &T,
        profile: CodecProfile,
    ) -> Result<TransportEnvelope, ExchangeError> {
        Ok(TransportEnvelope::new(self.encode(value, profile).await?))
    }
}
