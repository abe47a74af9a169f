//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use activityhub_core::Error as CoreError;

/// Wrapper carrying a core error out of a handler
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::RegistrationClosed
            | CoreError::AlreadyRegistered(_)
            | CoreError::AttendanceLocked
            | CoreError::AlreadyLocked
            | CoreError::DuplicateStudentId(_)
            | CoreError::DuplicateEmail(_) => StatusCode::CONFLICT,
            CoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(CoreError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::AlreadyRegistered("STU001".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(CoreError::AlreadyLocked), StatusCode::CONFLICT);
        assert_eq!(
            status_of(CoreError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "boom"
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
