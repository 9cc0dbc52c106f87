//! Unified error handling.
//!
//! Provides a single error type for the service and its conversion into
//! Axum HTTP responses. Client-facing outcomes (validation, conflict, absence)
//! map to 400; infrastructure failures map to an opaque 500 whose detail only
//! reaches the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, MSG_INVALID_PASSWORD};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Weak credential: {0}")]
    WeakCredential(String),

    // Resource errors
    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0} does not exist")]
    NotFound(String),

    /// Store rejected a write because the login is already taken
    #[error("Login already exists")]
    DuplicateLogin,

    // Infrastructure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::WeakCredential(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) | AppError::DuplicateLogin => "CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StoreUnavailable(_)
            | AppError::CacheUnavailable(_)
            | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::WeakCredential(_)
            | AppError::Conflict(_)
            | AppError::DuplicateLogin
            | AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_)
            | AppError::CacheUnavailable(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error stems from a failing backend rather than the request
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            AppError::StoreUnavailable(_) | AppError::CacheUnavailable(_) | AppError::Internal(_)
        )
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::WeakCredential(_) => MSG_INVALID_PASSWORD.to_string(),
            AppError::Conflict(msg) => format!("{} already exists", msg),
            AppError::NotFound(msg) => format!("{} does not exist", msg),

            // Hide which backend failed
            AppError::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::CacheUnavailable(msg) => {
                tracing::error!("Cache unavailable: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            AppError::DuplicateLogin => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::WeakCredential(reason) => AppError::WeakCredential(reason),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

// =============================================================================
// Backend Error Conversion
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

#[cfg(feature = "cache")]
impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::CacheUnavailable(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        AppError::NotFound(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        AppError::StoreUnavailable(msg.into())
    }

    pub fn cache_unavailable(msg: impl Into<String>) -> Self {
        AppError::CacheUnavailable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
