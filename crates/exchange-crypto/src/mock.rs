//! # Mock Transform
//!
//! A deterministic, call-counting [`CryptoTransform`] for tests. The
//! transform XORs every byte with a fixed mask, so `decrypt(encrypt(x)) == x`
//! without any key material, and records how many times each operation ran
//! so tests can assert the pipelines were (or were not) invoked.

use crate::errors::CryptoError;
use crate::transform::CryptoTransform;
use std::sync::atomic::{AtomicUsize, Ordering};

const MASK: u8 = 0x5A;

/// Deterministic mock transform with call counters.
#[derive(Default)]
pub struct MockTransform {
    /// Fail every `encrypt` call when set.
    pub fail_encrypt: bool,
    /// Fail every `decrypt` call when set.
    pub fail_decrypt: bool,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
}

impl MockTransform {
    /// Create a mock that succeeds on every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose `encrypt` always fails.
    #[must_use]
    pub fn failing_encrypt() -> Self {
        Self {
            fail_encrypt: true,
            ..Self::default()
        }
    }

    /// Create a mock whose `decrypt` always fails.
    #[must_use]
    pub fn failing_decrypt() -> Self {
        Self {
            fail_decrypt: true,
            ..Self::default()
        }
    }

    /// Number of `encrypt` calls observed.
    #[must_use]
    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of `decrypt` calls observed.
    #[must_use]
    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

impl CryptoTransform for MockTransform {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_encrypt {
            return Err(CryptoError::EncryptionFailed("mock failure".into()));
        }
        Ok(plaintext.iter().map(|b| b ^ MASK).collect())
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_decrypt {
            return Err(CryptoError::DecryptionFailed("mock failure".into()));
        }
        Ok(ciphertext.iter().map(|b| b ^ MASK).collect())
    }
}
