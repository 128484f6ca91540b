/**
 * Error Conversion
 *
 * `IntoResponse` for `ApiError`, producing the portal's failure envelope:
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "Invalid credentials",
 *   "errors": [{ "field": "email", "message": "Please provide a valid email" }]
 * }
 * ```
 *
 * `errors` is present only for validation failures. Internal failures are
 * logged here with their detail and answered with a generic message.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::error::types::ApiError;
use crate::shared::error::FieldError;

/// Body of every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Internal(detail) => tracing::error!("Request failed: {}", detail),
            ApiError::Validation(errors) => tracing::debug!("Validation failed: {:?}", errors),
            other => tracing::debug!("Request rejected ({}): {}", status, other),
        }

        let message = self.public_message();
        let body = match self {
            ApiError::Validation(errors) => ErrorBody {
                success: false,
                message,
                errors: Some(errors),
            },
            _ => ErrorBody::new(message),
        };

        (status, Json(body)).into_response()
    }
}

/// Response for panics caught by the outermost layer.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(crate::backend::error::types::GENERIC_SERVER_ERROR)),
    )
        .into_response()
}
