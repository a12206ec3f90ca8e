//! Application state for shared services

use std::sync::Arc;

use crate::domain::{AssetMemoizer, ChatService, ImageGenerator};

/// Shared handler state
///
/// The upstream capabilities are decided once, at startup: a `None`
/// generator or chat service means the corresponding credential or endpoint
/// is missing, and handlers answer with fallback indicators instead of
/// errors.
#[derive(Clone)]
pub struct AppState {
    pub memoizer: Arc<AssetMemoizer>,
    pub image_generator: Option<Arc<dyn ImageGenerator>>,
    pub chat: Option<Arc<dyn ChatService>>,
}
