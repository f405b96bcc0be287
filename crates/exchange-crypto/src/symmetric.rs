//! # Symmetric Transform
//!
//! XChaCha20-Poly1305 implementation of [`CryptoTransform`].
//!
//! ## Wire Framing
//!
//! Every encryption draws a fresh random 24-byte nonce and prepends it to
//! the ciphertext: `nonce || ciphertext`. The 192-bit nonce space makes
//! random nonces safe without coordination between concurrent requests.
//!
//! ## Security Properties
//!
//! - AEAD: tampered ciphertext fails authentication and decryption
//! - Key material is zeroized on drop

use crate::errors::CryptoError;
use crate::transform::CryptoTransform;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use zeroize::Zeroize;

/// Nonce length for XChaCha20-Poly1305 (bytes).
pub const NONCE_LEN: usize = 24;

/// Secret key (256-bit), zeroized on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Create from bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the slice is not 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self, CryptoError> {
        if slice.len() != 32 {
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Generate a random key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    /// Get the inner bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.write_str("SecretKey(***)")
    }
}

/// XChaCha20-Poly1305 byte transform.
pub struct XChaCha20Poly1305Transform {
    key: SecretKey,
}

impl XChaCha20Poly1305Transform {
    /// Create a transform from a secret key.
    #[must_use]
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }
}

impl CryptoTransform for XChaCha20Poly1305Transform {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut nonce_bytes);
        let nonce = XNonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

        let mut framed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        framed.extend_from_slice(&nonce_bytes);
        framed.extend_from_slice(&ciphertext);
        Ok(framed)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < NONCE_LEN {
            return Err(CryptoError::CiphertextTooShort {
                actual: ciphertext.len(),
                min: NONCE_LEN,
            });
        }

        let (nonce_bytes, body) = ciphertext.split_at(NONCE_LEN);
        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        let nonce = XNonce::from_slice(nonce_bytes);

        cipher
            .decrypt(nonce, body)
            .map_err(|_| CryptoError::DecryptionFailed("authentication failed".into()))
    }
}
