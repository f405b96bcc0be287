//! # Exchange Core
//!
//! Secure request/reply exchange: codec profiles, the encode/decode
//! pipelines with two-attempt result classification, and the listener that
//! drives them under a reply-or-silence failure policy.
//!
//! ## Data Flow
//!
//! ```text
//! inbound delivery ──→ ExchangeListener ──→ handler (business logic)
//!                                              │
//!                                              ▼
//!                        reply envelope ←── EncodePipeline
//!
//! transport reply ──→ DecodePipeline ──→ ExchangeResult<T> ──→ caller
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! exchange-core/
//! ├── codec.rs         # CodecProfile, CodecRegistry
//! ├── pipeline/        # encode (serialize→encrypt→Base64)
//! │                    # decode (Base64→decrypt→classify)
//! ├── listener.rs      # request/reply state machine, FailurePolicy
//! ├── client.rs        # caller side: correlation, timeout, decode
//! ├── bus.rs           # in-memory transport binding
//! └── config.rs        # ExchangeConfig
//! ```
//!
//! ## Concurrency
//!
//! There is no shared mutable state between in-flight requests; the codec
//! profiles and the crypto transform are shared read-only. Blocking pipeline
//! steps run on the blocking pool, and the bus admits deliveries through a
//! FIFO semaphore so concurrency stays bounded without any per-request
//! locking.

#![warn(clippy::all)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bus;
pub mod client;
pub mod codec;
pub mod config;
pub mod listener;
pub mod pipeline;

// Re-export main types
pub use bus::{delivery_channel, serve, Delivery};
pub use client::ExchangeClient;
pub use codec::{CodecProfile, CodecRegistry, FieldNaming, UnknownFields};
pub use codec::{EXTERNAL_PROFILE, INTERNAL_PROFILE};
pub use config::{ConfigError, ExchangeConfig};
pub use listener::{ExchangeHandler, ExchangeListener, FailurePolicy, ReplyOutcome};
pub use pipeline::{DecodePipeline, EncodePipeline, PREVIEW_LIMIT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
