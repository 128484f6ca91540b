/**
 * Student Catalog Handlers
 *
 * - `GET /api/student/handbooks` - summaries for the caller's track
 * - `GET /api/student/handbook/{id}` - one handbook, counting a view
 *
 * A student may open a handbook only if it belongs to their track.
 */

use axum::extract::{Path, State};
use sqlx::SqlitePool;

use crate::backend::auth::users::Student;
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::parse_id;
use crate::backend::handbooks::db::{find_handbook, list_summaries_for_track, record_view, Handbook, HandbookSummary};
use crate::backend::middleware::auth::CurrentStudent;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;

pub const NO_ACCESS: &str = "You do not have access to this handbook";

/// Load handbook `raw_id` if `student` may read it.
///
/// # Errors
///
/// * `404` - no such handbook (including ids that are not UUIDs)
/// * `403` - the handbook belongs to another track
pub async fn accessible_handbook(pool: &SqlitePool, student: &Student, raw_id: &str) -> ApiResult<Handbook> {
    let id = parse_id(raw_id, "Handbook")?;
    let handbook = find_handbook(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Handbook not found"))?;

    if handbook.track != student.track {
        tracing::warn!(
            "Student {} ({}) asked for {} handbook {}",
            student.id,
            student.track,
            handbook.track,
            handbook.id
        );
        return Err(ApiError::forbidden(NO_ACCESS));
    }
    Ok(handbook)
}

pub async fn get_track_handbooks(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> ApiResult<ApiResponse<Vec<HandbookSummary>>> {
    let handbooks = list_summaries_for_track(&state.db, student.track).await?;
    Ok(ApiResponse::list(handbooks))
}

pub async fn get_handbook(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Handbook>> {
    let handbook = accessible_handbook(&state.db, &student, &id).await?;

    // Deleted between the access check and the increment.
    let viewed = record_view(&state.db, handbook.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Handbook not found"))?;

    tracing::debug!("Student {} opened handbook {}", student.id, viewed.id);
    Ok(ApiResponse::data(viewed))
}
