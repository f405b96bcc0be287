//! # End-to-End Exchange Flows
//!
//! Drives the full path with the production cipher:
//!
//! ```text
//! ExchangeClient ──delivery──→ bus ──→ ExchangeListener
//!        ▲                                   │
//!        │                              EncodePipeline
//!        └────── TransportEnvelope ──────────┘
//! ```
//!
//! Requests travel as plain snake_case JSON (internal profile); replies come
//! back encrypted and camelCase-framed (external profile).

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;
    use std::time::Duration;

    use exchange_core::{
        delivery_channel, serve, DecodePipeline, EncodePipeline, ExchangeClient, ExchangeConfig,
        ExchangeHandler, ExchangeListener, FailurePolicy, EXTERNAL_PROFILE, INTERNAL_PROFILE,
    };
    use exchange_crypto::{CryptoTransform, SecretKey, XChaCha20Poly1305Transform};
    use exchange_types::{ExchangeError, ExchangeResult};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// The record exchanged in both directions.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct SecureRecord {
        id: String,
        value: String,
        count: u32,
        sensitive_data: String,
    }

    /// Handler whose pre-processing decodes the embedded Base64 field.
    struct RecordHandler;

    #[async_trait]
    impl ExchangeHandler for RecordHandler {
        type Request = SecureRecord;
        type Response = SecureRecord;

        fn prepare(&self, request: SecureRecord) -> Result<SecureRecord, ExchangeError> {
            let decoded = BASE64.decode(&request.sensitive_data).map_err(|e| {
                ExchangeError::InvalidArgument(format!("invalid sensitive_data encoding: {e}"))
            })?;
            let sensitive_data = String::from_utf8(decoded)
                .map_err(|e| ExchangeError::InvalidArgument(e.to_string()))?;
            Ok(SecureRecord {
                sensitive_data,
                ..request
            })
        }

        async fn handle(&self, request: SecureRecord) -> Result<SecureRecord, ExchangeError> {
            Ok(request)
        }
    }

    fn production_transform() -> Arc<dyn CryptoTransform> {
        Arc::new(XChaCha20Poly1305Transform::new(SecretKey::generate()))
    }

    /// Wire a client to a served listener over an in-memory channel.
    fn wire(policy: FailurePolicy, timeout: Duration) -> ExchangeClient {
        let transform = production_transform();
        let config = ExchangeConfig {
            failure_policy: policy,
            request_timeout: timeout,
            ..ExchangeConfig::default()
        };
        config.validate().unwrap();

        let listener = Arc::new(ExchangeListener::new(
            RecordHandler,
            EncodePipeline::new(Arc::clone(&transform)),
            INTERNAL_PROFILE,
            EXTERNAL_PROFILE,
            config.failure_policy,
        ));
        let (tx, rx) = delivery_channel(16);
        tokio::spawn(serve(rx, listener, config.max_in_flight));

        ExchangeClient::new(
            tx,
            DecodePipeline::new(transform),
            INTERNAL_PROFILE,
            EXTERNAL_PROFILE,
            config.request_timeout,
        )
    }

    // =========================================================================
    // INTEGRATION TESTS: REQUEST → LISTENER → ENCRYPTED REPLY
    // =========================================================================

    #[tokio::test]
    async fn test_full_round_trip_decodes_sensitive_field() {
        let client = wire(FailurePolicy::Silent, Duration::from_secs(2));

        let request = SecureRecord {
            id: "id-123".into(),
            value: "Test Value".into(),
            count: 99,
            sensitive_data: BASE64.encode("Decoded Value"),
        };

        let result: ExchangeResult<SecureRecord> = client.call(&request).await.unwrap();
        let reply = result.into_success().unwrap();

        assert_eq!(reply.sensitive_data, "Decoded Value");
        assert_eq!(reply.id, "id-123");
        assert_eq!(reply.value, "Test Value");
        assert_eq!(reply.count, 99);
    }

    #[tokio::test]
    async fn test_invalid_sensitive_field_means_silence() {
        let client = wire(FailurePolicy::Silent, Duration::from_secs(2));

        let request = SecureRecord {
            id: "id-123".into(),
            value: "Test Value".into(),
            count: 99,
            sensitive_data: "not-valid-base64!".into(),
        };

        // The listener stays silent; the caller sees the dropped channel.
        let err = client
            .call::<_, SecureRecord>(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ChannelClosed));
    }

    #[tokio::test]
    async fn test_many_concurrent_calls_round_trip_independently() {
        let client = Arc::new(wire(FailurePolicy::Silent, Duration::from_secs(5)));

        let mut tasks = Vec::new();
        for i in 0..16u32 {
            let client = Arc::clone(&client);
            tasks.push(tokio::spawn(async move {
                let request = SecureRecord {
                    id: format!("id-{i}"),
                    value: "v".into(),
                    count: i,
                    sensitive_data: BASE64.encode(format!("secret-{i}")),
                };
                let reply = client
                    .call_expecting::<_, SecureRecord>(&request)
                    .await
                    .unwrap();
                assert_eq!(reply.id, format!("id-{i}"));
                assert_eq!(reply.sensitive_data, format!("secret-{i}"));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
    }

    // =========================================================================
    // INTEGRATION TESTS: PIPELINES ALONE (NO BUS)
    // =========================================================================

    #[tokio::test]
    async fn test_encode_decode_round_trip_per_profile() {
        let transform = production_transform();
        let encoder = EncodePipeline::new(Arc::clone(&transform));
        let decoder = DecodePipeline::new(transform);

        let record = SecureRecord {
            id: "id-1".into(),
            value: "v".into(),
            count: 1,
            sensitive_data: "plain".into(),
        };

        for profile in [INTERNAL_PROFILE, EXTERNAL_PROFILE] {
            let encoded = encoder.encode(&record, profile).await.unwrap();
            let result = decoder
                .decode::<SecureRecord>(&encoded, profile)
                .await
                .unwrap();
            assert_eq!(result, ExchangeResult::Success(record.clone()));
        }
    }

    #[tokio::test]
    async fn test_profile_mismatch_surfaces_as_error_not_success() {
        let transform = production_transform();
        let encoder = EncodePipeline::new(Arc::clone(&transform));
        let decoder = DecodePipeline::new(transform);

        let record = SecureRecord {
            id: "id-1".into(),
            value: "v".into(),
            count: 1,
            sensitive_data: "plain".into(),
        };

        // Encoded camelCase, decoded expecting snake_case wire keys: the
        // success parse fails, the error fallback fails, and the payload is
        // reported unclassifiable rather than mistaken for either schema.
        let encoded = encoder.encode(&record, EXTERNAL_PROFILE).await.unwrap();
        let err = decoder
            .decode::<SecureRecord>(&encoded, INTERNAL_PROFILE)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::DeserializationFailed { .. }));
    }
}
