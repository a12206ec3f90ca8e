//! Image generation via the OpenAI Images API

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, ImageGenerator};
use crate::infrastructure::http_client::HttpClientTrait;

const DEFAULT_IMAGES_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "dall-e-3";
const DEFAULT_SIZE: &str = "1792x1024";

/// OpenAI Images API provider
///
/// One authenticated POST per generation; the first image URL in the
/// response is the artifact. No retries.
#[derive(Debug)]
pub struct OpenAiImages<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    size: String,
}

impl<C: HttpClientTrait> OpenAiImages<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_IMAGES_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            model: DEFAULT_MODEL.to_string(),
            size: DEFAULT_SIZE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    fn generations_url(&self) -> String {
        format!("{}/v1/images/generations", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "n": 1,
            "size": self.size,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, DomainError> {
        let response: ImagesResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::generation_failed(format!("Failed to parse response: {}", e))
        })?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| DomainError::generation_failed("No image URL in response"))
    }
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[async_trait]
impl<C: HttpClientTrait> ImageGenerator for OpenAiImages<C> {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let body = self.build_request(prompt);

        let json = self
            .client
            .post_json(&self.generations_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::generation_failed(e.to_string()))?;

        self.parse_response(json)
    }
}
