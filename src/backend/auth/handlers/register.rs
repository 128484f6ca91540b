/**
 * Register Handler
 *
 * POST /api/auth/register
 *
 * # Registration Process
 *
 * 1. Validate every field (all problems reported together)
 * 2. Reject an email that is already registered
 * 3. Hash the password and create the student
 * 4. Issue a student token
 * 5. Send the welcome email in the background
 * 6. Return 201 with the token and student summary
 */

use axum::{extract::State, http::StatusCode};

use crate::backend::auth::handlers::types::{AuthPayload, RegisterRequest, StudentSummary};
use crate::backend::auth::users::{create_student, find_student_by_email, NewStudent};
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::ApiJson;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::types::Role;

/// Register a new student
///
/// # Errors
///
/// * `400 Bad Request` - Validation failed or the email is taken
/// * `500 Internal Server Error` - Hashing, storage or signing failed
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, ApiResponse<AuthPayload<StudentSummary>>)> {
    let track = request.validate()?;
    tracing::info!("Registration request for email: {}", request.email.trim());

    if find_student_by_email(&state.db, &request.email).await?.is_some() {
        tracing::info!("Registration rejected, email already registered");
        return Err(ApiError::bad_request("Email already registered"));
    }

    let student = create_student(
        &state.db,
        NewStudent {
            full_name: request.full_name,
            email: request.email,
            whatsapp_number: request.whatsapp_number,
            password: request.password,
            track,
        },
        state.config.bcrypt_cost,
    )
    .await?;

    let token = state.tokens.issue(student.id, Role::Student)?;

    let mailer = state.mailer.clone();
    let welcomed = student.clone();
    tokio::spawn(async move {
        mailer.send_welcome_email(&welcomed).await;
    });

    tracing::info!("Student registered: {} ({})", student.id, student.track);

    let payload = AuthPayload {
        token,
        user: StudentSummary::from(&student),
    };
    Ok((
        StatusCode::CREATED,
        ApiResponse::data(payload).with_message("Registration successful"),
    ))
}
