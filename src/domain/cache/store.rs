//! Storage seam for memoized assets

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A memoized artifact with its creation timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The produced artifact reference (an image URL)
    pub value: String,
    /// Milliseconds since the Unix epoch at write time
    pub created_at: u64,
}

impl CacheEntry {
    pub fn new(value: impl Into<String>, created_at: u64) -> Self {
        Self {
            value: value.into(),
            created_at,
        }
    }
}

/// Keyed storage for cache entries
///
/// Implementations only store and retrieve; freshness is decided by the
/// memoizer. That keeps a process-local map and a shared external store
/// interchangeable without touching the memoization logic.
///
/// Keys are opaque: no trimming, no case folding.
#[async_trait]
pub trait AssetStore: Send + Sync + Debug {
    /// Reads the entry for a key, expired or not
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>, DomainError>;

    /// Writes an entry, replacing any previous entry for the key
    async fn write(&self, key: &str, entry: CacheEntry) -> Result<(), DomainError>;

    /// Deletes the entry for a key, returning whether one existed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Removes all entries
    async fn clear(&self) -> Result<(), DomainError>;

    /// Approximate number of stored entries
    async fn size(&self) -> Result<usize, DomainError>;
}
