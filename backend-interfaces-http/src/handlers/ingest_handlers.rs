use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::warn;

use backend_application::commands::ingest_commands;
use backend_application::AppState;
use backend_domain::MatchId;

use crate::error::HttpError;
use crate::middleware::{authorize, read_log_body};

pub async fn ingest_match(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<Json<MatchId>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }

    let content = read_log_body(&headers, &body, state.config.max_body_bytes).map_err(|err| {
        warn!(bytes = body.len(), "refused combat log upload: {}", err);
        HttpError::BadRequest(err.to_string())
    })?;

    let match_id = ingest_commands::ingest_combat_log(&state, &content).await?;
    Ok(Json(match_id))
}
