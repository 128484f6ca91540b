/**
 * Authorization Guard
 *
 * One guard, parameterized by the role a route group expects. For every
 * request it:
 *
 * 1. Extracts the bearer token from the `Authorization` header
 * 2. Verifies signature and expiry
 * 3. Checks the token's role tag against the expected role
 * 4. Loads the identity from the store for that role
 * 5. Rejects suspended students
 * 6. Attaches the loaded `Identity` to the request extensions
 *
 * Any failed step ends the request. Handlers behind the guard take
 * `CurrentStudent` or `CurrentAdmin` to read the identity back.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::admins::Admin;
use crate::backend::auth::identity::{load_identity, Identity};
use crate::backend::auth::users::Student;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;
use crate::shared::types::Role;

pub const NOT_AUTHORIZED: &str = "Not authorized to access this route";
pub const INVALID_TOKEN_TYPE: &str = "Invalid token type";
pub const ACCOUNT_SUSPENDED: &str = "Your account has been suspended";

/// State for one mounted guard: the app plus the role it admits.
#[derive(Clone)]
pub struct GuardState {
    pub app: AppState,
    pub role: Role,
}

impl GuardState {
    pub fn new(app: AppState, role: Role) -> Self {
        Self { app, role }
    }
}

/// Token from `Authorization: Bearer <token>`, if there is one.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the caller for a route group that admits `role`.
pub async fn authorize(state: &AppState, headers: &HeaderMap, role: Role) -> Result<Identity, ApiError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::debug!("Missing or malformed Authorization header");
        ApiError::unauthorized(NOT_AUTHORIZED)
    })?;

    let claims = state
        .tokens
        .verify(token)
        .map_err(|_| ApiError::unauthorized(NOT_AUTHORIZED))?;

    if claims.role != role {
        tracing::warn!("Token for a {} presented to a {} route", claims.role, role);
        return Err(ApiError::unauthorized(INVALID_TOKEN_TYPE));
    }

    let identity = load_identity(&state.db, role, claims.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject {} no longer exists", claims.id);
            match role {
                Role::Student => ApiError::unauthorized("User not found"),
                Role::Admin => ApiError::unauthorized("Admin not found"),
            }
        })?;

    if let Identity::Student(student) = &identity {
        if !student.is_active() {
            tracing::info!("Suspended student {} refused", student.id);
            return Err(ApiError::forbidden(ACCOUNT_SUSPENDED));
        }
    }

    Ok(identity)
}

/// Guard middleware; mount with `from_fn_with_state(GuardState::new(..), require_role)`.
pub async fn require_role(
    State(guard): State<GuardState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = authorize(&guard.app, request.headers(), guard.role).await?;
    tracing::debug!("Admitted {} {}", identity.role(), identity.id());
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// The student the guard admitted.
#[derive(Debug, Clone)]
pub struct CurrentStudent(pub Student);

impl<S: Send + Sync> FromRequestParts<S> for CurrentStudent {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Student(student)) => Ok(CurrentStudent(student.clone())),
            _ => {
                tracing::error!("CurrentStudent used on a route without the student guard");
                Err(ApiError::unauthorized(NOT_AUTHORIZED))
            }
        }
    }
}

/// The admin the guard admitted.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

impl<S: Send + Sync> FromRequestParts<S> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Admin(admin)) => Ok(CurrentAdmin(admin.clone())),
            _ => {
                tracing::error!("CurrentAdmin used on a route without the admin guard");
                Err(ApiError::unauthorized(NOT_AUTHORIZED))
            }
        }
    }
}
