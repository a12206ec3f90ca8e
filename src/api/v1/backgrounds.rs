//! Background image endpoints
//!
//! Upstream trouble never becomes an error page for the site: generation
//! failures and a missing credential both come back as fallback indicators
//! with HTTP 200, and the site shell keeps its static backdrop.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, BackgroundResponse, FallbackReason, GenerateBackgroundRequest,
};
use crate::domain::{scene, DomainError};

/// POST /v1/backgrounds
///
/// Returns the memoized background for the derived key, generating it when
/// missing, expired, or regeneration is forced.
pub async fn generate_background(
    State(state): State<AppState>,
    Json(request): Json<GenerateBackgroundRequest>,
) -> Result<Json<BackgroundResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    // Key: the custom prompt when present, else the scene id. Keys are
    // opaque; nothing is trimmed or case-folded.
    let (key, prompt) = match (&request.custom_prompt, &request.scene) {
        (Some(custom), _) => (custom.clone(), custom.clone()),
        (None, Some(scene_id)) => match scene::prompt_for(scene_id) {
            Some(prompt) => (scene_id.clone(), prompt.to_string()),
            None => {
                return Err(ApiError::bad_request(format!(
                    "Unrecognized scene '{}'. Recognized scenes: {}",
                    scene_id,
                    scene::scene_ids().join(", ")
                ))
                .with_param("scene"));
            }
        },
        (None, None) => {
            return Err(ApiError::bad_request(
                "Either scene or custom_prompt is required",
            ));
        }
    };

    let Some(generator) = state.image_generator.clone() else {
        info!(
            request_id = %request_id,
            key = %key,
            "image generation not configured, returning fallback"
        );
        return Ok(Json(BackgroundResponse::fallback(
            FallbackReason::NotConfigured,
        )));
    };

    info!(
        request_id = %request_id,
        key = %key,
        force_regenerate = request.force_regenerate,
        "processing background request"
    );

    let result = state
        .memoizer
        .get_or_create(&key, request.force_regenerate, move |_key| async move {
            generator.generate(&prompt).await
        })
        .await;

    match result {
        Ok(url) => Ok(Json(BackgroundResponse::ready(url))),
        Err(DomainError::Validation { message }) => Err(ApiError::bad_request(message)),
        Err(err) => {
            warn!(
                request_id = %request_id,
                key = %key,
                error = %err,
                "background generation failed, returning fallback"
            );
            Ok(Json(BackgroundResponse::fallback(
                FallbackReason::GenerationFailed,
            )))
        }
    }
}

/// GET /v1/backgrounds/{scene}
///
/// Cache lookup only; never triggers generation. A miss carries the list of
/// recognized scenes so the site can correct itself.
pub async fn lookup_background(
    State(state): State<AppState>,
    Path(scene_id): Path<String>,
) -> Result<Json<BackgroundResponse>, ApiError> {
    match state.memoizer.get(&scene_id).await? {
        Some(url) => Ok(Json(BackgroundResponse::ready(url))),
        None => Ok(Json(
            BackgroundResponse::fallback(FallbackReason::NotCached)
                .with_recognized_scenes(scene::scene_ids()),
        )),
    }
}

/// DELETE /v1/backgrounds/{scene}
pub async fn invalidate_background(
    State(state): State<AppState>,
    Path(scene_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.memoizer.invalidate(&scene_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router_with_state;
    use crate::domain::generator::mock::MockGenerator;
    use crate::domain::{AssetMemoizer, ImageGenerator, DEFAULT_TTL};
    use crate::infrastructure::cache::InMemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn state_with_generator(generator: Option<Arc<dyn ImageGenerator>>) -> AppState {
        AppState {
            memoizer: Arc::new(AssetMemoizer::new(Arc::new(InMemoryStore::new()), DEFAULT_TTL)),
            image_generator: generator,
            chat: None,
        }
    }

    fn post_backgrounds(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/backgrounds")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_background(scene: &str) -> Request<Body> {
        // Percent-encode spaces so a custom-prompt key builds a valid URI;
        // axum decodes the path param back to the original string.
        let encoded = scene.replace(' ', "%20");
        Request::builder()
            .uri(format!("/v1/backgrounds/{}", encoded))
            .body(Body::empty())
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_then_lookup() {
        let generator = Arc::new(MockGenerator::new().with_url("https://img/tea.png"));
        let app = create_router_with_state(state_with_generator(Some(generator.clone())));

        let response = app
            .clone()
            .oneshot(post_backgrounds(serde_json::json!({"scene": "teaParty"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["url"], "https://img/tea.png");
        assert_eq!(body["fallback"], false);

        let response = app.oneshot(get_background("teaParty")).await.unwrap();
        let body = response_json(response).await;
        assert_eq!(body["url"], "https://img/tea.png");
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_uses_cache_on_second_request() {
        let generator = Arc::new(MockGenerator::new().with_url("https://img/1.png"));
        let app = create_router_with_state(state_with_generator(Some(generator.clone())));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_backgrounds(serde_json::json!({"scene": "garden"})))
                .await
                .unwrap();
            let body = response_json(response).await;
            assert_eq!(body["url"], "https://img/1.png");
        }

        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_force_regenerate_invokes_generator_again() {
        let generator = Arc::new(
            MockGenerator::new()
                .with_url("https://img/old.png")
                .with_url("https://img/new.png"),
        );
        let app = create_router_with_state(state_with_generator(Some(generator.clone())));

        app.clone()
            .oneshot(post_backgrounds(serde_json::json!({"scene": "garden"})))
            .await
            .unwrap();
        let response = app
            .clone()
            .oneshot(post_backgrounds(
                serde_json::json!({"scene": "garden", "force_regenerate": true}),
            ))
            .await
            .unwrap();

        let body = response_json(response).await;
        assert_eq!(body["url"], "https://img/new.png");
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_custom_prompt_is_key_and_prompt() {
        let generator = Arc::new(MockGenerator::new().with_url("https://img/custom.png"));
        let app = create_router_with_state(state_with_generator(Some(generator)));

        let response = app
            .clone()
            .oneshot(post_backgrounds(
                serde_json::json!({"custom_prompt": "a dormouse in a teapot"}),
            ))
            .await
            .unwrap();
        let body = response_json(response).await;
        assert_eq!(body["url"], "https://img/custom.png");

        // cached under the prompt text itself
        let response = app
            .oneshot(get_background("a dormouse in a teapot"))
            .await
            .unwrap();
        let body = response_json(response).await;
        assert_eq!(body["url"], "https://img/custom.png");
    }

    #[tokio::test]
    async fn test_not_configured_returns_fallback() {
        let app = create_router_with_state(state_with_generator(None));

        let response = app
            .oneshot(post_backgrounds(serde_json::json!({"scene": "entry"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["fallback"], true);
        assert_eq!(body["reason"], "not_configured");
    }

    #[tokio::test]
    async fn test_generation_failure_returns_fallback() {
        let generator = Arc::new(MockGenerator::new().with_failure("upstream down"));
        let app = create_router_with_state(state_with_generator(Some(generator)));

        let response = app
            .oneshot(post_backgrounds(serde_json::json!({"scene": "entry"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["fallback"], true);
        assert_eq!(body["reason"], "generation_failed");
    }

    #[tokio::test]
    async fn test_unrecognized_scene_is_rejected() {
        let generator = Arc::new(MockGenerator::new());
        let app = create_router_with_state(state_with_generator(Some(generator.clone())));

        let response = app
            .oneshot(post_backgrounds(serde_json::json!({"scene": "cheshire"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_scene_and_prompt_is_rejected() {
        let app = create_router_with_state(state_with_generator(None));

        let response = app
            .oneshot(post_backgrounds(serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lookup_miss_lists_recognized_scenes() {
        let app = create_router_with_state(state_with_generator(None));

        let response = app.oneshot(get_background("garden")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["fallback"], true);
        assert_eq!(body["reason"], "not_cached");
        assert!(body["recognized_scenes"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("garden")));
    }

    #[tokio::test]
    async fn test_invalidate_then_lookup_misses() {
        let generator = Arc::new(MockGenerator::new().with_url("https://img/1.png"));
        let app = create_router_with_state(state_with_generator(Some(generator)));

        app.clone()
            .oneshot(post_backgrounds(serde_json::json!({"scene": "garden"})))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/backgrounds/garden")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get_background("garden")).await.unwrap();
        let body = response_json(response).await;
        assert_eq!(body["fallback"], true);
    }
}
