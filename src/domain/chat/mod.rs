//! Chat forwarding seam

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Forwards an opaque chat payload to the conversational backend and
/// returns its reply verbatim
#[async_trait]
pub trait ChatService: Send + Sync + Debug {
    async fn forward(&self, payload: serde_json::Value) -> Result<serde_json::Value, DomainError>;
}
