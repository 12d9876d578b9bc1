//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use serein_core::TaskError;
use tracing::error;

/// Wrapper turning domain errors into HTTP responses.
///
/// Handlers return `Result<_, ApiError>` and use `?` on anything that yields
/// a [`TaskError`].
pub struct ApiError(pub TaskError);

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TaskError::TaskNotFound { .. } => StatusCode::NOT_FOUND,
            TaskError::Validation { .. }
            | TaskError::InvalidStatus { .. }
            | TaskError::InvalidPriority { .. } => StatusCode::BAD_REQUEST,
            TaskError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            TaskError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TaskError::TaskNotFound { id: 7 }, StatusCode::NOT_FOUND),
            (TaskError::validation("Le titre est requis"), StatusCode::BAD_REQUEST),
            (
                TaskError::Storage {
                    reason: "disk full".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (TaskError::upstream("timeout"), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
