//! Store selection from configuration

use std::sync::Arc;

use crate::config::CacheSettings;
use crate::domain::cache::AssetStore;
use crate::domain::DomainError;

use super::in_memory::{InMemoryStore, InMemoryStoreConfig};
use super::redis::{RedisStore, RedisStoreConfig};

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// Process-local moka map
    #[default]
    InMemory,
    /// Shared Redis store
    Redis,
}

impl std::fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheBackend::InMemory => write!(f, "in_memory"),
            CacheBackend::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CacheBackend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CacheBackend::InMemory),
            "redis" => Ok(CacheBackend::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache backend: {}. Valid backends: in_memory, redis",
                s
            ))),
        }
    }
}

/// Creates the configured asset store
pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(settings: &CacheSettings) -> Result<Arc<dyn AssetStore>, DomainError> {
        match settings.backend.parse()? {
            CacheBackend::InMemory => {
                let config =
                    InMemoryStoreConfig::default().with_max_capacity(settings.max_capacity);
                Ok(Arc::new(InMemoryStore::with_config(config)))
            }
            CacheBackend::Redis => {
                let url = settings.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("cache.redis_url is required for the redis backend")
                })?;

                let mut config =
                    RedisStoreConfig::new(url).with_retention(settings.ttl() * 2);

                if let Some(prefix) = &settings.key_prefix {
                    config = config.with_key_prefix(prefix.clone());
                }

                let store = RedisStore::new(config).await?;
                Ok(Arc::new(store))
            }
        }
    }
}
