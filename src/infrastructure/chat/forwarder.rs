//! Thin proxy posting chat payloads to the configured endpoint

use async_trait::async_trait;

use crate::domain::{ChatService, DomainError};
use crate::infrastructure::http_client::HttpClientTrait;

/// Forwards chat messages verbatim and returns the upstream reply verbatim
///
/// The payload shape belongs to the external service; this layer adds no
/// interpretation and no retries.
#[derive(Debug)]
pub struct ChatForwarder<C: HttpClientTrait> {
    client: C,
    endpoint: String,
}

impl<C: HttpClientTrait> ChatForwarder<C> {
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> ChatService for ChatForwarder<C> {
    async fn forward(&self, payload: serde_json::Value) -> Result<serde_json::Value, DomainError> {
        self.client
            .post_json(
                &self.endpoint,
                vec![("Content-Type", "application/json")],
                &payload,
            )
            .await
            .map_err(|e| match e {
                DomainError::Upstream { message, .. } => DomainError::upstream("chat", message),
                other => other,
            })
    }
}
