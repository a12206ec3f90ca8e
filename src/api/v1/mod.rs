//! Site API v1 endpoints

pub mod backgrounds;
pub mod chat;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/backgrounds", post(backgrounds::generate_background))
        .route(
            "/backgrounds/{scene}",
            get(backgrounds::lookup_background).delete(backgrounds::invalidate_background),
        )
        .route("/chat", post(chat::forward_chat))
}
