//! Image generation seam

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Produces an image for a text prompt, returning a URL to the artifact
///
/// Any failure (transport, non-success status, response missing the image
/// URL) surfaces as `DomainError::GenerationFailed`. Implementations do not
/// retry; callers decide how to fall back.
#[async_trait]
pub trait ImageGenerator: Send + Sync + Debug {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
