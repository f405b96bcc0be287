//! # Crypto Transform Port
//!
//! The opaque `bytes -> bytes` encrypt/decrypt operation consumed by the
//! encode/decode pipelines. The pipelines never see key material, nonces,
//! or cipher choice; they only observe success or a [`CryptoError`].

use crate::errors::CryptoError;

/// Opaque encrypt/decrypt byte transform.
///
/// Implementations must be stateless or internally synchronized: a single
/// transform instance is shared read-only across all concurrent requests.
pub trait CryptoTransform: Send + Sync {
    /// Encrypt plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncryptionFailed`] if the cipher rejects the
    /// input.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decrypt ciphertext bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::DecryptionFailed`] on malformed or tampered
    /// input, including authentication failure when the cipher checks it.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
