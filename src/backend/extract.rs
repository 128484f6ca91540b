//! Request extractors
//!
//! Thin wrappers over axum's extractors whose rejections come back in the
//! portal's failure envelope instead of axum's plain-text bodies.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use uuid::Uuid;

use crate::backend::error::ApiError;

/// `Json<T>` with a 400 envelope on malformed bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!("Rejected JSON body: {}", rejection.body_text());
                Err(ApiError::bad_request(rejection.body_text()))
            }
        }
    }
}

/// Parse a path id. A string that is not a UUID cannot name any record, so
/// it is reported the same way as an unknown id.
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::not_found(format!("{} not found", entity)))
}
