//! Request and response types for the site API

pub mod error;

pub use error::{ApiError, ApiErrorResponse};

use serde::{Deserialize, Serialize};

/// POST /v1/backgrounds request body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateBackgroundRequest {
    /// Recognized scene identifier; used as the cache key when no custom
    /// prompt is given
    #[serde(default)]
    pub scene: Option<String>,
    /// Free-form prompt; when present it is both the prompt and the cache key
    #[serde(default)]
    pub custom_prompt: Option<String>,
    /// Bypass any cached entry and call the generator
    #[serde(default)]
    pub force_regenerate: bool,
}

/// Why a fallback was returned instead of a background URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No image API credential; the site should use its static backdrop
    NotConfigured,
    /// The generator call did not produce a usable image
    GenerationFailed,
    /// Nothing cached for the requested scene
    NotCached,
}

/// Background lookup / generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FallbackReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_scenes: Option<Vec<String>>,
}

impl BackgroundResponse {
    pub fn ready(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            fallback: false,
            reason: None,
            recognized_scenes: None,
        }
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            url: None,
            fallback: true,
            reason: Some(reason),
            recognized_scenes: None,
        }
    }

    pub fn with_recognized_scenes(mut self, scenes: Vec<String>) -> Self {
        self.recognized_scenes = Some(scenes);
        self
    }
}
