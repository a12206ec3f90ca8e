//! TTL-bounded memoization of generated assets

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::store::{AssetStore, CacheEntry};
use crate::domain::DomainError;

/// Default freshness window for memoized assets
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Memoizes the output of an expensive generator per key for a bounded
/// time window
///
/// An entry older than the TTL is treated as absent, not merely stale, and
/// is removed lazily on the next read. Concurrent misses for the same key
/// may each invoke the generator; there is no single-flight de-duplication
/// at this layer.
#[derive(Debug)]
pub struct AssetMemoizer {
    store: Arc<dyn AssetStore>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AssetMemoizer {
    pub fn new(store: Arc<dyn AssetStore>, ttl: Duration) -> Self {
        Self::with_clock(store, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn AssetStore>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { store, ttl, clock }
    }

    /// Returns the cached value for a key if a non-expired entry exists
    ///
    /// Never invokes a generator. Expired entries are dropped and reported
    /// as absent.
    pub async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.store.read(key).await? {
            Some(entry) if self.is_fresh(&entry) => Ok(Some(entry.value)),
            Some(_) => {
                debug!(key, "cache entry expired, dropping");
                self.store.delete(key).await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Returns the cached value for a key, invoking the generator when the
    /// entry is missing, expired, or regeneration is forced
    ///
    /// On generator success the result overwrites any prior entry for the
    /// key; on failure the error propagates unchanged and the cache is left
    /// untouched.
    pub async fn get_or_create<F, Fut>(
        &self,
        key: &str,
        force_regenerate: bool,
        generate: F,
    ) -> Result<String, DomainError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String, DomainError>>,
    {
        if key.is_empty() {
            return Err(DomainError::validation("cache key must not be empty"));
        }

        if !force_regenerate {
            if let Some(value) = self.get(key).await? {
                debug!(key, "cache hit");
                return Ok(value);
            }
        }

        debug!(key, force_regenerate, "invoking generator");
        let value = generate(key.to_string()).await?;

        let entry = CacheEntry::new(value.clone(), self.clock.now_millis());
        self.store.write(key, entry).await?;

        Ok(value)
    }

    /// Removes the entry for a key; idempotent
    pub async fn invalidate(&self, key: &str) -> Result<(), DomainError> {
        self.store.delete(key).await?;
        Ok(())
    }

    /// Removes all entries
    pub async fn clear(&self) -> Result<(), DomainError> {
        self.store.clear().await
    }

    /// Number of stored entries, including expired ones not yet collected
    pub async fn entry_count(&self) -> Result<usize, DomainError> {
        self.store.size().await
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        let now = self.clock.now_millis();
        now.saturating_sub(entry.created_at) < self.ttl.as_millis() as u64
    }
}
