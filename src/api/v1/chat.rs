//! Chat forwarding endpoint

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::state::AppState;

/// Reply served when the conversational backend is missing or unreachable
const FALLBACK_REPLY: &str = "The Cheshire Cat has wandered off for a moment. \
     Please try again shortly, or call the salon to book directly.";

/// POST /v1/chat
///
/// Forwards the payload verbatim and returns the upstream reply verbatim.
/// When the backend is unconfigured or fails, a themed static reply comes
/// back instead of an error.
pub async fn forward_chat(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let request_id = Uuid::new_v4().to_string();

    let Some(chat) = state.chat.clone() else {
        info!(request_id = %request_id, "chat not configured, returning fallback reply");
        return Json(fallback_payload());
    };

    match chat.forward(payload).await {
        Ok(reply) => Json(reply),
        Err(err) => {
            warn!(
                request_id = %request_id,
                error = %err,
                "chat upstream failed, returning fallback reply"
            );
            Json(fallback_payload())
        }
    }
}

fn fallback_payload() -> serde_json::Value {
    serde_json::json!({
        "reply": FALLBACK_REPLY,
        "fallback": true,
    })
}
