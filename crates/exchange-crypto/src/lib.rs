//! # Exchange Crypto
//!
//! The injectable byte transform used by the encode/decode pipelines.
//!
//! The pipelines treat encryption as an opaque `bytes -> bytes` operation
//! behind the [`CryptoTransform`] trait; this crate supplies the production
//! implementation (XChaCha20-Poly1305 with a random per-message nonce) and a
//! deterministic mock for tests.
//!
//! ## Module Structure
//!
//! ```text
//! exchange-crypto/
//! ├── transform.rs     # CryptoTransform trait
//! ├── symmetric.rs     # XChaCha20-Poly1305 implementation, SecretKey
//! ├── mock.rs          # Call-counting mock transform for tests
//! └── errors.rs        # CryptoError
//! ```
//!
//! ## Concurrency
//!
//! Implementations must be safe for concurrent use by many in-flight
//! requests without locking; both implementations here are stateless apart
//! from read-only key material.

pub mod errors;
pub mod mock;
pub mod symmetric;
pub mod transform;

pub use errors::CryptoError;
pub use mock::MockTransform;
pub use symmetric::{SecretKey, XChaCha20Poly1305Transform, NONCE_LEN};
pub use transform::CryptoTransform;
