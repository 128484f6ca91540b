//! Success envelope shared by every handler.
//!
//! ```json
//! { "success": true, "message": "...", "count": 3, "data": [...] }
//! ```
//!
//! `message`, `count` and `data` are omitted when unset. A handler that
//! needs an explicit `"data": null` uses `ApiResponse<Option<T>>`.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// A list payload with its length reported in `count`.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self::data(items).with_count(count)
    }
}

impl ApiResponse<()> {
    /// A success carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
