//! # Exchange Types
//!
//! Shared wire types and the error taxonomy for CipherExchange.
//!
//! Everything that crosses the exchange boundary lives here: the
//! single-field [`TransportEnvelope`], the structured [`ErrorEnvelope`]
//! business-error shape, the two-variant [`ExchangeResult`] produced by the
//! decode pipeline, and the opaque [`CorrelationId`] that accompanies every
//! request.
//!
//! ## Design Rules
//!
//! - `ExchangeResult` has exactly two variants and is only ever constructed
//!   by the decode pipeline; consumers match exhaustively.
//! - `ErrorEnvelope` is immutable once constructed.
//! - `CorrelationId` carries no business semantics; it exists for logging
//!   and reply routing only.

pub mod correlation;
pub mod envelope;
pub mod errors;

pub use correlation::CorrelationId;
pub use envelope::{ErrorEnvelope, ExchangeResult, TransportEnvelope};
pub use errors::ExchangeError;
