//! # Exchange Listener
//!
//! Drives one inbound delivery through the request/reply state machine:
//!
//! ```text
//! Received ──→ Processing ──→ { Replying | Silent | Propagated }
//! ```
//!
//! The failure contract is "if we cannot safely build a reply, emit
//! nothing": the remote peer relies on its own timeout instead of receiving
//! a malformed or partial reply. Pipeline failures are never swallowed
//! silently inside the pipelines themselves; this listener is the one place
//! that converts them into silence, and every conversion is logged with the
//! correlation identifier even though it is invisible on the wire.
//!
//! Exactly one terminal outcome is reached per delivery; no delivery ever
//! produces more than one reply.

use crate::codec::CodecProfile;
use crate::pipeline::encode::EncodePipeline;
use async_trait::async_trait;
use exchange_types::{CorrelationId, ErrorEnvelope, ExchangeError, TransportEnvelope};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Error code used when a handler failure is reported to the peer under
/// [`FailurePolicy::ReplyWithError`].
pub const HANDLER_FAILED_CODE: &str = "HANDLER_FAILED";

/// What the listener does when a delivery cannot produce a normal reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Emit nothing; the peer relies on its own timeout. The default.
    Silent,
    /// Encode business-logic failures as an [`ErrorEnvelope`] reply.
    /// Pre-processing failures still fall back to silence: a request we
    /// could not interpret gets no reply.
    ReplyWithError,
    /// Surface failures to the transport binding's own negative-acknowledge
    /// mechanism. Mutually exclusive with silence per deployment.
    Propagate,
}

/// Terminal outcome of processing one delivery.
#[derive(Debug)]
#[must_use]
pub enum ReplyOutcome {
    /// One reply is emitted.
    Replied(TransportEnvelope),
    /// Zero replies are emitted.
    Silent,
    /// The failure surfaces to the transport binding.
    Propagated(ExchangeError),
}

impl ReplyOutcome {
    /// Whether the outcome emits a reply.
    #[must_use]
    pub fn is_replied(&self) -> bool {
        matches!(self, Self::Replied(_))
    }

    /// Whether the outcome emits nothing.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::Silent)
    }
}

/// Business logic invoked by the listener.
///
/// `prepare` runs synchronously before the handler proper and covers any
/// pre-processing of the request payload, such as decoding an embedded
/// field; the default implementation passes the request through untouched.
#[async_trait]
pub trait ExchangeHandler: Send + Sync {
    /// Deserialized request type.
    type Request: DeserializeOwned + Serialize + Send + 'static;
    /// Response type encoded into the reply.
    type Response: Serialize + Send + Sync + 'static;

    /// Synchronous pre-processing of the request payload.
    ///
    /// # Errors
    ///
    /// Any error here means the request could not be safely interpreted;
    /// the listener stays silent (or propagates, per policy).
    fn prepare(&self, request: Self::Request) -> Result<Self::Request, ExchangeError> {
        Ok(request)
    }

    /// Produce the plaintext response object for a prepared request.
    async fn handle(&self, request: Self::Request) -> Result<Self::Response, ExchangeError>;
}

/// Listener binding a handler to the encode pipeline and codec profiles.
pub struct ExchangeListener<H> {
    handler: H,
    encoder: EncodePipeline,
    inbound: CodecProfile,
    outbound: CodecProfile,
    policy: FailurePolicy,
}

impl<H: ExchangeHandler> ExchangeListener<H> {
    /// Create a listener.
    ///
    /// `inbound` decodes request payloads; `outbound` encodes replies for
    /// the external party.
    #[must_use]
    pub fn new(
        handler: H,
        encoder: EncodePipeline,
        inbound: CodecProfile,
        outbound: CodecProfile,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            handler,
            encoder,
            inbound,
            outbound,
            policy,
        }
    }

    /// The configured failure policy.
    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Process one delivery to its terminal outcome.
    pub async fn process(
        &self,
        payload: Option<String>,
        correlation_id: &CorrelationId,
    ) -> ReplyOutcome {
        // Received
        let Some(raw) = payload else {
            warn!(
                correlation_id = %correlation_id,
                "delivery carried no payload, staying silent"
            );
            return ReplyOutcome::Silent;
        };
        debug!(
            correlation_id = %correlation_id,
            bytes = raw.len(),
            "request received"
        );

        // Processing: request decode, then handler pre-processing. Neither
        // failure is ever reported to the peer as an error reply.
        let request = match self.inbound.deserialize::<H::Request>(raw.as_bytes()) {
            Ok(request) => request,
            Err(e) => return self.no_reply(e, correlation_id, "request decode"),
        };
        let prepared = match self.handler.prepare(request) {
            Ok(prepared) => prepared,
            Err(e) => return self.no_reply(e, correlation_id, "pre-processing"),
        };

        // Business logic
        let response = match self.handler.handle(prepared).await {
            Ok(response) => response,
            Err(e) => return self.handler_failure(e, correlation_id).await,
        };

        // Replying
        match self.encoder.encode_envelope(&response, self.outbound).await {
            Ok(envelope) => {
                info!(correlation_id = %correlation_id, "reply encoded");
                ReplyOutcome::Replied(envelope)
            }
            Err(e) => self.no_reply(e, correlation_id, "reply encode"),
        }
    }

    /// Silence-or-propagate for stages where an error reply is never an
    /// option: the failed stage means no trustworthy reply can be built.
    fn no_reply(
        &self,
        error: ExchangeError,
        correlation_id: &CorrelationId,
        stage: &'static str,
    ) -> ReplyOutcome {
        if self.policy == FailurePolicy::Propagate {
            error!(
                correlation_id = %correlation_id,
                stage,
                error = %error,
                "propagating failure to transport"
            );
            return ReplyOutcome::Propagated(error);
        }
        error!(
            correlation_id = %correlation_id,
            stage,
            error = %error,
            "cannot build a reply, staying silent"
        );
        ReplyOutcome::Silent
    }

    /// Business-logic failure, dispatched by policy.
    async fn handler_failure(
        &self,
        error: ExchangeError,
        correlation_id: &CorrelationId,
    ) -> ReplyOutcome {
        match self.policy {
            FailurePolicy::Silent => self.no_reply(error, correlation_id, "business logic"),
            FailurePolicy::Propagate => {
                error!(
                    correlation_id = %correlation_id,
                    error = %error,
                    "propagating business-logic failure to transport"
                );
                ReplyOutcome::Propagated(error)
            }
            FailurePolicy::ReplyWithError => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %error,
                    "business logic failed, replying with error envelope"
                );
                let envelope = ErrorEnvelope::new(HANDLER_FAILED_CODE, error.to_string());
                match self.encoder.encode_envelope(&envelope, self.outbound).await {
                    Ok(reply) => ReplyOutcome::Replied(reply),
                    // Never emit a broken reply, even for an error envelope.
                    Err(e) => self.no_reply(e, correlation_id, "error-reply encode"),
                }
            }
        }
    }
}
