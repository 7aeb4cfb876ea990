//! Error types for the file server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Server Error Enum ==
/// Unified error type for the file server.
///
/// Cache operations themselves never fail; the only cache-level error is a
/// bad construction parameter. Everything else belongs to the dispatcher.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Bounded cache constructed with a capacity it cannot honor
    #[error("Invalid cache capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Configuration value that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request is missing a file name or extension
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Requested file type is not served
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No file with that name under the root directory
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidCapacity(_)
            | ServerError::InvalidConfig(_)
            | ServerError::Io(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ServerError::BadRequest(msg)
            | ServerError::Forbidden(msg)
            | ServerError::NotFound(msg) => msg.clone(),
            // Don't leak filesystem details to clients
            _ => "Internal server error".to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the file server.
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            ServerError::from(io).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_capacity_message() {
        let err = ServerError::InvalidCapacity(0);
        assert!(err.to_string().contains("must be at least 1"));
    }
}
