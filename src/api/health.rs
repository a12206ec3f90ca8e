//! Health check endpoints for deployment probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;

/// Health response with optional component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simple liveness probe - 200 while the process runs
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    };

    (StatusCode::OK, Json(response))
}

/// Bare liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe with dependency verification
///
/// A broken cache store makes the service unhealthy; missing upstream
/// configuration only degrades it, since handlers keep answering with
/// fallbacks.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks = Vec::new();
    let mut overall = HealthStatus::Healthy;

    let cache_check = match state.memoizer.entry_count().await {
        Ok(count) => HealthCheck {
            name: "cache".to_string(),
            status: HealthStatus::Healthy,
            message: Some(format!("{} entries", count)),
        },
        Err(e) => {
            overall = HealthStatus::Unhealthy;
            HealthCheck {
                name: "cache".to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
            }
        }
    };
    checks.push(cache_check);

    if state.image_generator.is_none() {
        if overall == HealthStatus::Healthy {
            overall = HealthStatus::Degraded;
        }
        checks.push(HealthCheck {
            name: "image_generator".to_string(),
            status: HealthStatus::Degraded,
            message: Some("no API credential; serving fallbacks".to_string()),
        });
    }

    if state.chat.is_none() {
        if overall == HealthStatus::Healthy {
            overall = HealthStatus::Degraded;
        }
        checks.push(HealthCheck {
            name: "chat".to_string(),
            status: HealthStatus::Degraded,
            message: Some("no endpoint configured; serving fallbacks".to_string()),
        });
    }

    let status_code = if overall == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let response = HealthResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
    };

    (status_code, Json(response))
}
