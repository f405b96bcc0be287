//! # In-Memory Transport Binding
//!
//! Delivers `(payload, correlation identifier)` pairs to an
//! [`ExchangeListener`] and accepts at most one reply per delivery.
//!
//! Each delivery is processed on its own spawned task so one request's
//! blocking pipeline step never stalls another's. Admission is bounded by a
//! FIFO semaphore for backpressure. A caller that disappears mid-request
//! simply loses its reply; the in-flight task runs to completion and its
//! result is discarded rather than left dangling.
//!
//! Terminal outcomes map onto the wire as:
//! - `Replied`: the envelope is sent on the delivery's reply channel
//! - `Silent`: the reply channel is dropped; the caller times out
//! - `Propagated`: logged at error level; a broker binding would surface
//!   this through its own negative-acknowledge mechanism, the in-memory
//!   binding has none

use crate::listener::{ExchangeHandler, ExchangeListener, ReplyOutcome};
use exchange_types::{CorrelationId, TransportEnvelope};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tracing::{debug, error, warn};

/// One inbound request unit as handed over by the transport.
#[derive(Debug)]
pub struct Delivery {
    /// Raw request payload; `None` models a delivery without a payload.
    pub payload: Option<String>,
    /// Correlation identifier accompanying the request.
    pub correlation_id: CorrelationId,
    /// Channel for at most one reply. Dropping it is explicit silence.
    pub reply: oneshot::Sender<TransportEnvelope>,
}

/// Create a bounded delivery channel.
#[must_use]
pub fn delivery_channel(capacity: usize) -> (mpsc::Sender<Delivery>, mpsc::Receiver<Delivery>) {
    mpsc::channel(capacity)
}

/// Serve deliveries until the channel closes.
///
/// Each delivery acquires a FIFO admission permit, then runs on an
/// independently scheduled task. At most `max_in_flight` deliveries are
/// processed concurrently.
pub async fn serve<H>(
    mut deliveries: mpsc::Receiver<Delivery>,
    listener: Arc<ExchangeListener<H>>,
    max_in_flight: usize,
) where
    H: ExchangeHandler + 'static,
{
    let permits = Arc::new(Semaphore::new(max_in_flight));

    while let Some(delivery) = deliveries.recv().await {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            // Semaphore closed: nothing more can be admitted.
            warn!("admission semaphore closed, stopping exchange bus");
            break;
        };
        let listener = Arc::clone(&listener);

        tokio::spawn(async move {
            let _permit = permit;
            let Delivery {
                payload,
                correlation_id,
                reply,
            } = delivery;

            match listener.process(payload, &correlation_id).await {
                ReplyOutcome::Replied(envelope) => {
                    if reply.send(envelope).is_err() {
                        debug!(
                            correlation_id = %correlation_id,
                            "caller went away before the reply was sent"
                        );
                    }
                }
                ReplyOutcome::Silent => {
                    // Dropping the reply sender is the silence on the wire.
                    drop(reply);
                }
                ReplyOutcome::Propagated(e) => {
                    error!(
                        correlation_id = %correlation_id,
                        error = %e,
                        "failure propagated to transport"
                    );
                    drop(reply);
                }
            }
        });
    }
    debug!("delivery channel closed, exchange bus stopped");
}
