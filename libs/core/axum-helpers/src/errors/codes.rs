//! Type-safe error codes for API responses.
//!
//! Each code has a string form for clients (e.g. "DATABASE_ERROR"), an integer
//! for logs and metrics, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::DatabaseError;
//! assert_eq!(code.as_str(), "DATABASE_ERROR");
//! assert_eq!(code.code(), 2003);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body could not be bound to the expected shape
    InvalidJson,

    /// Requested resource was not found
    NotFound,

    // Database errors (2000-2999)
    /// Database connection or write error
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: Client errors
    /// - 2000-2999: Database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::NotFound => 1004,
            Self::InvalidJson => 1010,
            Self::DatabaseError => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InvalidJson => "Invalid JSON format",
            Self::NotFound => "Resource not found",
            Self::DatabaseError => "Database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_representations() {
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
        assert_eq!(ErrorCode::InvalidJson.to_string(), "INVALID_JSON");
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::DatabaseError).unwrap();
        assert_eq!(json, "\"DATABASE_ERROR\"");
        let code: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, ErrorCode::DatabaseError);
    }
}
