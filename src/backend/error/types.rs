/**
 * Backend Error Types
 *
 * This module defines the error taxonomy used by every HTTP handler and by
 * the authorization guard. Each variant maps to exactly one HTTP status.
 *
 * # Error Categories
 *
 * - `Validation` / `BadRequest` - malformed or rejected input (400)
 * - `Unauthorized` - missing, invalid or mismatched token, unknown identity (401)
 * - `Forbidden` - valid identity denied by policy (403)
 * - `NotFound` - referenced entity absent (404)
 * - `TooManyRequests` - edge rate limit exceeded (429)
 * - `Internal` - persistence or unexpected failure (500)
 *
 * Internal details are kept for logging only; clients always see the
 * generic `Server error` message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::{FieldError, SharedError};

/// Message returned to clients for every internal failure.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// Message returned by the rate limiter.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more request fields failed validation
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// Request rejected with a single message
    #[error("{0}")]
    BadRequest(String),

    /// Caller is not authenticated for this route
    #[error("{0}")]
    Unauthorized(String),

    /// Caller is authenticated but not allowed
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("{}", RATE_LIMIT_MESSAGE)]
    TooManyRequests,

    /// Persistence or unexpected failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message clients are allowed to see
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(_) => "Validation failed".to_string(),
            Self::BadRequest(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message) => message.clone(),
            Self::TooManyRequests => RATE_LIMIT_MESSAGE.to_string(),
            Self::Internal(_) => GENERIC_SERVER_ERROR.to_string(),
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<SharedError> for ApiError {
    fn from(err: SharedError) -> Self {
        Self::Validation(vec![err.into()])
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(format!("database error: {}", err))
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("io error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing error: {}", err))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {}", err))
    }
}
