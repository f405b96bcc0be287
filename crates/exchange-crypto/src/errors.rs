//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed (includes authentication failure)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Ciphertext is shorter than the nonce prefix
    #[error("Ciphertext too short: {actual} bytes, need at least {min}")]
    CiphertextTooShort {
        /// Actual ciphertext length in bytes
        actual: usize,
        /// Minimum valid length in bytes
        min: usize,
    },

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },
}
