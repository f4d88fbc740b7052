use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(&'static str),
    /// The cause has already been logged where it happened.
    Internal,
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::NotParsable => HttpError::BadRequest("could not parse any entry".to_string()),
            AppError::MatchNotFound(_) => HttpError::NotFound("match with given id not found"),
            AppError::NoResult { .. } => HttpError::NotFound("no result matched the given query"),
            AppError::Internal(_) => HttpError::Internal,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            HttpError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "the operation failed".to_string(),
            ),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use backend_domain::MatchId;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        HttpError::from(err).into_response().status()
    }

    #[test]
    fn application_errors_map_to_status_codes() {
        assert_eq!(status_of(AppError::NotParsable), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::MatchNotFound(MatchId(7))), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::NoResult {
                hero: "bane".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Internal(anyhow!("disk full"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
