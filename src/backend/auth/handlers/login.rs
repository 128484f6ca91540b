/**
 * Login Handlers
 *
 * POST /api/auth/login (students) and POST /api/admin/login (admins).
 *
 * # Authentication Process
 *
 * 1. Validate the request shape
 * 2. Look up the credential form by email
 * 3. Verify the password with bcrypt
 * 4. Students only: refuse suspended accounts
 * 5. Issue a token for the matching role
 *
 * # Security
 *
 * - Unknown email and wrong password give the same 401 body
 * - An unknown email still pays for one bcrypt verification
 * - Account status is revealed only to callers who know the password
 */

use axum::extract::State;

use crate::backend::auth::admins::find_admin_credentials;
use crate::backend::auth::handlers::types::{AdminSummary, AuthPayload, LoginRequest, StudentSummary};
use crate::backend::auth::passwords::{verify_against_dummy, verify_password};
use crate::backend::auth::users::{find_student_credentials, touch_last_login};
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::ApiJson;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::types::Role;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const SUSPENDED_AT_LOGIN: &str = "Your account has been suspended. Please contact support.";

/// Student login handler
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthPayload<StudentSummary>>> {
    request.validate()?;
    tracing::info!("Login request for email: {}", request.email.trim());

    let Some(credentials) = find_student_credentials(&state.db, &request.email).await? else {
        verify_against_dummy(request.password, state.config.bcrypt_cost).await;
        tracing::warn!("Login failed: unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(request.password, credentials.password_hash).await? {
        tracing::warn!("Login failed: wrong password for {}", credentials.student.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let student = credentials.student;
    if !student.is_active() {
        tracing::info!("Login refused for suspended student {}", student.id);
        return Err(ApiError::forbidden(SUSPENDED_AT_LOGIN));
    }

    touch_last_login(&state.db, student.id).await?;
    let token = state.tokens.issue(student.id, Role::Student)?;

    tracing::info!("Student logged in: {}", student.id);
    Ok(ApiResponse::data(AuthPayload {
        token,
        user: StudentSummary::from(&student),
    })
    .with_message("Login successful"))
}

/// Admin login handler
pub async fn admin_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthPayload<AdminSummary>>> {
    request.validate()?;
    tracing::info!("Admin login request for email: {}", request.email.trim());

    let Some(credentials) = find_admin_credentials(&state.db, &request.email).await? else {
        verify_against_dummy(request.password, state.config.bcrypt_cost).await;
        tracing::warn!("Admin login failed: unknown email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify_password(request.password, credentials.password_hash).await? {
        tracing::warn!("Admin login failed: wrong password for {}", credentials.admin.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let admin = credentials.admin;
    let token = state.tokens.issue(admin.id, Role::Admin)?;

    tracing::info!("Admin logged in: {}", admin.id);
    Ok(ApiResponse::data(AuthPayload {
        token,
        user: AdminSummary::from(&admin),
    })
    .with_message("Login successful"))
}
