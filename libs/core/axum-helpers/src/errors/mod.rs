pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// ```json
/// {
///   "code": 2003,
///   "error": "DATABASE_ERROR",
///   "message": "Server selection timeout: No available servers"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Storage failure; the detail is echoed to the caller.
    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg)
            }
            AppError::Database(msg) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {}",
                    msg
                );
                let message = if msg.is_empty() {
                    ErrorCode::DatabaseError.default_message().to_string()
                } else {
                    msg
                };
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError, message)
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_body(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_database_error_echoes_detail() {
        let response = AppError::Database("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = error_body(response).await;
        assert_eq!(body.code, 2003);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert_eq!(body.message, "connection refused");
    }

    #[tokio::test]
    async fn test_database_error_never_has_empty_message() {
        let body = error_body(AppError::Database(String::new()).into_response()).await;
        assert_eq!(body.message, "Database error occurred");
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = AppError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_body(response).await.error, "NOT_FOUND");
    }
}
