//! # Encode/Decode Pipelines
//!
//! The transport codec of the exchange layer.
//!
//! Outbound: serialize → encrypt → Base64-encode, producing the transport
//! string. Inbound: Base64-decode → decrypt → classify, producing an
//! [`exchange_types::ExchangeResult`]. Step ordering within one payload is
//! strictly sequential; across payloads the pipelines are freely concurrent
//! because their only collaborators (codec profile, crypto transform) are
//! shared read-only.

pub mod decode;
pub mod encode;

pub use decode::{DecodePipeline, PREVIEW_LIMIT};
pub use encode::EncodePipeline;
