//! # Exchange Client
//!
//! The caller side of the exchange: send a request with a fresh correlation
//! identifier, await the correlated reply under a timeout, then run the
//! decode pipeline and hand the caller an [`ExchangeResult`] to branch on.
//!
//! A responder that stays silent is observed here as either
//! [`ExchangeError::ChannelClosed`] (the responder explicitly dropped the
//! reply) or [`ExchangeError::Timeout`] (nothing arrived in time); the wire
//! deliberately does not distinguish why.

use crate::bus::Delivery;
use crate::codec::CodecProfile;
use crate::pipeline::decode::DecodePipeline;
use exchange_types::{CorrelationId, ExchangeError, ExchangeResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Request/reply client over a delivery channel.
pub struct ExchangeClient {
    requests: mpsc::Sender<Delivery>,
    decoder: DecodePipeline,
    request_profile: CodecProfile,
    reply_profile: CodecProfile,
    timeout: Duration,
}

impl ExchangeClient {
    /// Create a client.
    ///
    /// `request_profile` serializes outgoing request payloads;
    /// `reply_profile` decodes the encrypted replies.
    #[must_use]
    pub fn new(
        requests: mpsc::Sender<Delivery>,
        decoder: DecodePipeline,
        request_profile: CodecProfile,
        reply_profile: CodecProfile,
        timeout: Duration,
    ) -> Self {
        Self {
            requests,
            decoder,
            request_profile,
            reply_profile,
            timeout,
        }
    }

    /// Send `request` and decode the correlated reply.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ChannelClosed`] when the transport or responder
    ///   went away without replying
    /// - [`ExchangeError::Timeout`] when no reply arrived in time
    /// - [`ExchangeError::EmptyReply`] when the envelope carried no payload
    /// - any decode-pipeline failure, unchanged
    pub async fn call<Req, T>(&self, request: &Req) -> Result<ExchangeResult<T>, ExchangeError>
    where
        Req: Serialize,
        T: DeserializeOwned + Serialize + Send + 'static,
    {
        let payload_bytes = self.request_profile.serialize(request)?;
        let payload = String::from_utf8(payload_bytes)
            .map_err(|e| ExchangeError::Serialization(e.to_string()))?;

        let correlation_id = CorrelationId::new();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.requests
            .send(Delivery {
                payload: Some(payload),
                correlation_id: correlation_id.clone(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| ExchangeError::ChannelClosed)?;
        debug!(correlation_id = %correlation_id, "request sent, awaiting reply");

        let envelope = match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(_)) => {
                warn!(correlation_id = %correlation_id, "responder closed without a reply");
                return Err(ExchangeError::ChannelClosed);
            }
            Err(_) => {
                warn!(
                    correlation_id = %correlation_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "timed out waiting for reply"
                );
                return Err(ExchangeError::Timeout);
            }
        };

        if envelope.data.is_empty() {
            return Err(ExchangeError::EmptyReply);
        }
        self.decoder
            .decode::<T>(&envelope.data, self.reply_profile)
            .await
    }

    /// [`Self::call`] for callers that expect success: the error variant is
    /// raised as [`ExchangeError::Business`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::call`], plus [`ExchangeError::Business`] for a
    /// decoded business error.
    pub async fn call_expecting<Req, T>(&self, request: &Req) -> Result<T, ExchangeError>
    where
        Req: Serialize,
        T: DeserializeOwned + Serialize + Send + 'static,
    {
        self.call(request).await?.into_result()
    }
}
