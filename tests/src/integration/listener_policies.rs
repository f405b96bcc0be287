//! # Reply-or-Silence Policy Matrix
//!
//! Exercises each [`FailurePolicy`] end to end: what the remote caller
//! observes, and which collaborators were (never) invoked on the way to
//! silence.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;
    use std::time::Duration;

    use exchange_core::{
        delivery_channel, serve, DecodePipeline, EncodePipeline, ExchangeClient, ExchangeHandler,
        ExchangeListener, FailurePolicy, EXTERNAL_PROFILE, INTERNAL_PROFILE,
    };
    use exchange_crypto::MockTransform;
    use exchange_types::{ExchangeError, ExchangeResult};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Order {
        order_id: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Receipt {
        order_id: String,
        accepted: bool,
    }

    /// Handler with switchable failure stages.
    struct OrderHandler {
        fail_prepare: bool,
        fail_handle: bool,
    }

    #[async_trait]
    impl ExchangeHandler for OrderHandler {
        type Request = Order;
        type Response = Receipt;

        fn prepare(&self, request: Order) -> Result<Order, ExchangeError> {
            if self.fail_prepare {
                return Err(ExchangeError::InvalidArgument("unparseable order".into()));
            }
            Ok(request)
        }

        async fn handle(&self, request: Order) -> Result<Receipt, ExchangeError> {
            if self.fail_handle {
                return Err(ExchangeError::Handler("inventory lookup failed".into()));
            }
            Ok(Receipt {
                order_id: request.order_id,
                accepted: true,
            })
        }
    }

    fn wire(
        handler: OrderHandler,
        policy: FailurePolicy,
    ) -> (ExchangeClient, Arc<MockTransform>) {
        let transform = Arc::new(MockTransform::new());
        let listener = Arc::new(ExchangeListener::new(
            handler,
            EncodePipeline::new(transform.clone()),
            INTERNAL_PROFILE,
            EXTERNAL_PROFILE,
            policy,
        ));
        let (tx, rx) = delivery_channel(8);
        tokio::spawn(serve(rx, listener, 8));

        let client = ExchangeClient::new(
            tx,
            DecodePipeline::new(transform.clone()),
            INTERNAL_PROFILE,
            EXTERNAL_PROFILE,
            Duration::from_secs(1),
        );
        (client, transform)
    }

    fn order() -> Order {
        Order {
            order_id: "ord-1".into(),
        }
    }

    #[tokio::test]
    async fn test_happy_path_emits_exactly_one_reply() {
        let (client, _) = wire(
            OrderHandler {
                fail_prepare: false,
                fail_handle: false,
            },
            FailurePolicy::Silent,
        );

        let receipt = client
            .call_expecting::<_, Receipt>(&order())
            .await
            .unwrap();
        assert!(receipt.accepted);
        assert_eq!(receipt.order_id, "ord-1");
    }

    #[tokio::test]
    async fn test_silent_policy_prepare_failure_never_touches_encode_pipeline() {
        let (client, transform) = wire(
            OrderHandler {
                fail_prepare: true,
                fail_handle: false,
            },
            FailurePolicy::Silent,
        );

        let err = client.call::<_, Receipt>(&order()).await.unwrap_err();

        assert!(matches!(err, ExchangeError::ChannelClosed));
        assert_eq!(transform.encrypt_calls(), 0);
        assert_eq!(transform.decrypt_calls(), 0);
    }

    #[tokio::test]
    async fn test_silent_policy_handler_failure_is_silence_on_the_wire() {
        let (client, transform) = wire(
            OrderHandler {
                fail_prepare: false,
                fail_handle: true,
            },
            FailurePolicy::Silent,
        );

        let err = client.call::<_, Receipt>(&order()).await.unwrap_err();

        assert!(matches!(err, ExchangeError::ChannelClosed));
        assert_eq!(transform.encrypt_calls(), 0);
    }

    #[tokio::test]
    async fn test_reply_with_error_policy_delivers_decodable_envelope() {
        let (client, _) = wire(
            OrderHandler {
                fail_prepare: false,
                fail_handle: true,
            },
            FailurePolicy::ReplyWithError,
        );

        let result: ExchangeResult<Receipt> = client.call(&order()).await.unwrap();

        let envelope = result.error().unwrap();
        assert_eq!(envelope.error_code, "HANDLER_FAILED");
        assert!(envelope.message.contains("inventory lookup failed"));
    }

    #[tokio::test]
    async fn test_propagate_policy_still_emits_nothing_on_this_binding() {
        let (client, _) = wire(
            OrderHandler {
                fail_prepare: false,
                fail_handle: true,
            },
            FailurePolicy::Propagate,
        );

        // The in-memory binding has no nack channel; propagation is logged
        // and the caller observes the dropped reply.
        let err = client.call::<_, Receipt>(&order()).await.unwrap_err();
        assert!(matches!(err, ExchangeError::ChannelClosed));
    }
}
