//! Domain layer - core business logic and upstream seams

pub mod cache;
pub mod chat;
pub mod error;
pub mod generator;
pub mod scene;

pub use cache::{AssetMemoizer, AssetStore, CacheEntry, Clock, SystemClock, DEFAULT_TTL};
pub use chat::ChatService;
pub use error::DomainError;
pub use generator::ImageGenerator;
