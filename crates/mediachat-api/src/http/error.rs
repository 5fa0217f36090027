//! Application error type mapping to HTTP status codes and the error body.
//!
//! Every failure body has the shape `{"error": <message>, "code": <CODE>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use mediachat_types::error::{IdentityError, SessionError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Session and generation errors.
    Session(SessionError),
    /// Authentication failure.
    Unauthorized(String),
    /// Validation error outside the session domain (malformed body, unknown route kind).
    Validation(String),
    /// Path names something that does not exist.
    NotFound(String),
    /// Generic internal error.
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Session(e @ SessionError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", e.to_string())
            }
            AppError::Session(e @ SessionError::NotFound) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", e.to_string())
            }
            AppError::Session(e @ SessionError::Forbidden) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", e.to_string())
            }
            AppError::Session(e @ SessionError::GenerationFailure(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED", e.to_string())
            }
            AppError::Session(e @ SessionError::StorageError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "Request failed");
        }

        let body = json!({
            "error": message,
            "code": code,
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_session_errors_map_to_statuses() {
        assert_eq!(
            status_of(SessionError::InvalidRequest("title is required".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(SessionError::NotFound.into()), StatusCode::NOT_FOUND);
        assert_eq!(status_of(SessionError::Forbidden.into()), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(SessionError::GenerationFailure("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(SessionError::StorageError("disk".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transport_errors_map_to_statuses() {
        assert_eq!(
            status_of(AppError::Unauthorized("missing key".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Validation("bad json".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("unknown media kind".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_error_body_shape() {
        let (status, code, message) = AppError::from(SessionError::Forbidden).parts();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "FORBIDDEN");
        assert_eq!(message, "session belongs to another identity");

        let (_, code, message) = AppError::Unauthorized("Missing API key".into()).parts();
        assert_eq!(code, "UNAUTHORIZED");
        assert_eq!(message, "Missing API key");
    }
}
