use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::error::DomainError;

/// REST-facing error with a stable `{code, message}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;

        let (status, code, safe_msg): (StatusCode, &str, &str) = match &self {
            BadRequest(m) => (StatusCode::BAD_REQUEST, "bad_request", m.as_str()),
            NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            ),
        };

        match &self {
            Internal(detail) => tracing::error!(
                error = %detail,
                status = status.as_u16(),
                "request failed"
            ),
            other => tracing::warn!(
                error = %other,
                status = status.as_u16(),
                "request failed"
            ),
        }

        let body = ErrorBody {
            code,
            message: safe_msg,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound { .. }
            | DomainError::AppointmentNotFound { .. }
            | DomainError::TimeSlotNotFound { .. } => ApiError::NotFound(e.to_string()),

            DomainError::EmailAlreadyExists { .. }
            | DomainError::GoogleUidAlreadyExists { .. }
            | DomainError::AppointmentOverlap { .. }
            | DomainError::TimeSlotOverlap { .. }
            | DomainError::InvalidStatusTransition { .. } => ApiError::Conflict(e.to_string()),

            DomainError::InvalidEmail { .. }
            | DomainError::InvalidTimezone { .. }
            | DomainError::EmptyName
            | DomainError::NameTooLong { .. }
            | DomainError::NotesTooLong { .. }
            | DomainError::InvalidInterval { .. }
            | DomainError::Validation { .. } => ApiError::BadRequest(e.to_string()),

            // Internal detail is logged by IntoResponse, never sent to the client.
            DomainError::Database { message } => ApiError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(DomainError::user_not_found(Uuid::new_v4()));
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_overlap_maps_to_conflict() {
        let now = Utc::now();
        let err = ApiError::from(DomainError::appointment_overlap(
            now,
            now + chrono::Duration::hours(1),
        ));
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let now = Utc::now();
        let err = ApiError::from(DomainError::invalid_interval(now, now));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let err = ApiError::from(DomainError::database("connection refused at 10.0.0.5"));
        assert_eq!(err.to_string(), "internal error");
    }
}
