//! Groomery Gateway
//!
//! Backend for the Through the Looking Glass Groomery website:
//! - AI-generated scene backgrounds, memoized per key with a bounded
//!   freshness window so the paid image API is not called redundantly
//! - Interchangeable in-memory / Redis stores behind one storage seam
//! - Chat forwarding to the salon's conversational backend
//! - Graceful fallbacks whenever an upstream credential is missing or a
//!   call fails

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use api::AppState;
use domain::{AssetMemoizer, ChatService, ImageGenerator};
use infrastructure::cache::StoreFactory;
use infrastructure::chat::ChatForwarder;
use infrastructure::generator::OpenAiImages;
use infrastructure::http_client::HttpClient;

/// Builds the shared application state from configuration
///
/// Upstream capabilities are decided here, once: a missing image API key or
/// chat endpoint yields a `None` capability and fallback responses, never a
/// startup failure.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = StoreFactory::create(&config.cache).await?;
    let memoizer = Arc::new(AssetMemoizer::new(store, config.cache.ttl()));

    let image_generator: Option<Arc<dyn ImageGenerator>> = match &config.images.api_key {
        Some(api_key) => {
            let client = HttpClient::with_timeout(Duration::from_secs(config.images.timeout_secs));
            let provider = OpenAiImages::with_base_url(client, api_key, &config.images.base_url)
                .with_model(&config.images.model)
                .with_size(&config.images.size);
            Some(Arc::new(provider))
        }
        None => {
            warn!("images.api_key not set; background generation disabled, serving fallbacks");
            None
        }
    };

    let chat: Option<Arc<dyn ChatService>> = match &config.chat.endpoint {
        Some(endpoint) => {
            let client = HttpClient::with_timeout(Duration::from_secs(config.chat.timeout_secs));
            Some(Arc::new(ChatForwarder::new(client, endpoint)))
        }
        None => {
            warn!("chat.endpoint not set; chat forwarding disabled, serving fallbacks");
            None
        }
    };

    info!(
        cache_backend = %config.cache.backend,
        ttl_hours = config.cache.ttl_hours,
        images_configured = image_generator.is_some(),
        chat_configured = chat.is_some(),
        "application state initialized"
    );

    Ok(AppState {
        memoizer,
        image_generator,
        chat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_without_credentials() {
        let config = AppConfig::default();
        let state = create_app_state(&config).await.unwrap();

        assert!(state.image_generator.is_none());
        assert!(state.chat.is_none());
        assert_eq!(state.memoizer.entry_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_app_state_with_credentials() {
        let mut config = AppConfig::default();
        config.images.api_key = Some("sk-test".to_string());
        config.chat.endpoint = Some("https://chat.example.com/api".to_string());

        let state = create_app_state(&config).await.unwrap();

        assert!(state.image_generator.is_some());
        assert!(state.chat.is_some());
    }
}
