//! # Decode Pipeline
//!
//! Base64-decode → decrypt → classify a transport string into an
//! [`ExchangeResult`].
//!
//! Classification is the load-bearing step: the wire format is untagged, so
//! the same decrypted bytes may represent either a domain value or a
//! business error. The pipeline first attempts the expected success schema;
//! only if that parse fails does it attempt the [`ErrorEnvelope`] fallback
//! against the SAME bytes with the SAME profile. Success-first ordering is a
//! strict contract: it decides which schema wins when a payload could
//! satisfy both.

use crate::codec::CodecProfile;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use exchange_crypto::CryptoTransform;
use exchange_types::{ErrorEnvelope, ExchangeError, ExchangeResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Maximum bytes of an unclassifiable payload quoted in diagnostics.
/// Bounds log volume and keeps large sensitive blobs out of logs.
pub const PREVIEW_LIMIT: usize = 200;

/// Inbound pipeline: Base64-framed ciphertext to a classified result.
#[derive(Clone)]
pub struct DecodePipeline {
    transform: Arc<dyn CryptoTransform>,
}

impl DecodePipeline {
    /// Create a pipeline over a shared crypto transform.
    #[must_use]
    pub fn new(transform: Arc<dyn CryptoTransform>) -> Self {
        Self { transform }
    }

    /// Decode `data` and classify the plaintext as `T` or [`ErrorEnvelope`].
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidArgument`] for empty input, before any
    ///   transform or codec call
    /// - [`ExchangeError::DecodingFailed`] for malformed Base64
    /// - [`ExchangeError::DecryptionFailed`] when the transform rejects the
    ///   ciphertext; no further steps run
    /// - [`ExchangeError::DeserializationFailed`] when the plaintext matches
    ///   neither schema, carrying the target name and a bounded preview
    pub async fn decode<T>(
        &self,
        data: &str,
        profile: CodecProfile,
    ) -> Result<ExchangeResult<T>, ExchangeError>
    where
        T: DeserializeOwned + Serialize + Send + 'static,
    {
        if data.is_empty() {
            return Err(ExchangeError::InvalidArgument(
                "encrypted payload cannot be empty".into(),
            ));
        }

        let ciphertext = BASE64.decode(data)?;
        debug!(bytes = ciphertext.len(), "decoded transport framing");

        let transform = Arc::clone(&self.transform);
        tokio::task::spawn_blocking(move || {
            let plaintext = transform.decrypt(&ciphertext)?;
            classify::<T>(&plaintext, profile)
        })
        .await
        .map_err(|e| ExchangeError::Task(format!("decode task failed: {e}")))?
    }
}

/// Two-attempt, success-first classification of decrypted bytes.
fn classify<T>(plaintext: &[u8], profile: CodecProfile) -> Result<ExchangeResult<T>, ExchangeError>
where
    T: DeserializeOwned + Serialize,
{
    let target = std::any::type_name::<T>();

    match profile.deserialize::<T>(plaintext) {
        Ok(value) => Ok(ExchangeResult::Success(value)),
        Err(primary) => {
            warn!(
                target_schema = target,
                profile = profile.name,
                reason = %primary,
                "payload did not match success schema, attempting error envelope"
            );
            match profile.deserialize::<ErrorEnvelope>(plaintext) {
                Ok(envelope) => Ok(ExchangeResult::Error(envelope)),
                Err(fallback) => {
                    error!(
                        target_schema = target,
                        profile = profile.name,
                        reason = %fallback,
                        payload_preview = %preview(plaintext),
                        "payload matches neither success nor error schema"
                    );
                    Err(ExchangeError::DeserializationFailed {
                        target: target.to_string(),
                        preview: preview(plaintext),
                    })
                }
            }
        }
    }
}

/// Lossy UTF-8 preview of a payload, truncated to [`PREVIEW_LIMIT`] bytes.
///
/// The bound holds for the output as well as the input: replacement
/// characters are wider than the invalid bytes they stand in for, so the
/// converted string is truncated again on a char boundary.
fn preview(bytes: &[u8]) -> String {
    let end = bytes.len().min(PREVIEW_LIMIT);
    let mut out = String::from_utf8_lossy(&bytes[..end]).into_owned();
    if out.len() > PREVIEW_LIMIT {
        let mut cut = PREVIEW_LIMIT;
        while !out.is_char_boundary(cut) {
            cut -= 1;
        }
        out.truncate(cut);
    }
    out
}
