use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::AppState;

use crate::middleware::authorize;

#[derive(serde::Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    let (code, status) = match timeout(timeout_duration, state.health_service.check_database()).await {
        Ok(Ok(true)) => (StatusCode::OK, "ok"),
        Ok(Ok(false)) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        Ok(Err(err)) => {
            error!("ready check failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "error")
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            (StatusCode::SERVICE_UNAVAILABLE, "timeout")
        }
    };
    (code, Json(HealthStatus { status }))
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
