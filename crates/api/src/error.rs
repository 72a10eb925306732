//! Unified request error handling.
//!
//! Provides the `ApiError` union returned by the request handlers. The
//! transport adapter turns it into an HTTP response; everything below the
//! adapter stays framework-free.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Request-level error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid creation payload; the message is shown to the client.
    #[error("{0}")]
    Validation(String),

    /// Path identity and payload identity disagree.
    #[error("resource identity does not match request path")]
    IdMismatch,

    /// Referenced identity does not exist (never did, or was deleted).
    #[error("not found")]
    NotFound,

    /// The row was modified concurrently; deliberately surfaced, never
    /// merged or retried.
    #[error("concurrency conflict: {0}")]
    Conflict(String),

    /// Store operation failed.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::Database(error) => Self::Database(error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server-side failures are logged; client errors are not.
        if matches!(self, Self::Conflict(_) | Self::Database(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) | Self::IdMismatch => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Validation(message) => message,
            Self::IdMismatch | Self::NotFound => String::new(),
            Self::Conflict(_) | Self::Database(_) => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(ApiError::Validation("Product name is required.".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(ApiError::IdMismatch), StatusCode::BAD_REQUEST);
        assert_eq!(get_status(ApiError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(ApiError::Conflict("orders row 7".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(ApiError::Database(sqlx::Error::PoolTimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_errors_map_through() {
        assert!(matches!(
            ApiError::from(RepositoryError::NotFound),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(RepositoryError::Conflict("x".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
            ApiError::Database(_)
        ));
    }

    #[test]
    fn test_validation_message_reaches_the_client() {
        let err = ApiError::Validation("Amount must be greater than zero.".to_string());
        assert_eq!(err.to_string(), "Amount must be greater than zero.");
    }

    #[test]
    fn test_conflict_detail_stays_internal() {
        let response =
            ApiError::Conflict("orders row 7 was modified concurrently".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
