//! Asset store implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{CacheBackend, StoreFactory};
pub use in_memory::{InMemoryStore, InMemoryStoreConfig};
pub use redis::{RedisStore, RedisStoreConfig};
