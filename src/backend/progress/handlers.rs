/**
 * Reading Progress Handlers
 *
 * - `POST /api/student/progress` - record reading progress
 * - `GET /api/student/progress/{handbookId}` - read it back
 */

use axum::extract::{Path, State};
use serde::Deserialize;

use crate::backend::error::ApiResult;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::auth::CurrentStudent;
use crate::backend::progress::db::{
    completion_percentage, find_progress, upsert_progress, ProgressDetail, ProgressUpdate, ReadingProgress,
};
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::backend::student::catalog::accessible_handbook;
use crate::shared::error::{FieldError, Validator};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub handbook_id: Option<String>,
    pub last_page_read: Option<i64>,
    /// Minutes spent since the previous update
    pub time_spent: Option<i64>,
}

impl ProgressRequest {
    /// Returns `(handbook id, last page read, minutes spent)`.
    fn validate(self) -> Result<(String, i64, i64), Vec<FieldError>> {
        let mut validator = Validator::new();
        validator
            .check(
                self.handbook_id.as_deref().map(|id| !id.trim().is_empty()).unwrap_or(false),
                "handbookId",
                "Handbook ID is required",
            )
            .check(
                self.last_page_read.map(|page| page >= 0).unwrap_or(false),
                "lastPageRead",
                "Last page read must be a non-negative number",
            )
            .check(
                self.time_spent.map(|t| t >= 0).unwrap_or(true),
                "timeSpent",
                "Time spent must be a non-negative number",
            );
        validator.finish()?;

        Ok((
            self.handbook_id.unwrap_or_default(),
            self.last_page_read.unwrap_or_default(),
            self.time_spent.unwrap_or(0),
        ))
    }
}

pub async fn update_progress(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    ApiJson(request): ApiJson<ProgressRequest>,
) -> ApiResult<ApiResponse<ReadingProgress>> {
    let (handbook_id, last_page_read, time_spent) = request.validate()?;
    let handbook = accessible_handbook(&state.db, &student, &handbook_id).await?;

    let progress = upsert_progress(
        &state.db,
        ProgressUpdate {
            user_id: student.id,
            handbook_id: handbook.id,
            last_page_read,
            time_spent,
            completion_percentage: completion_percentage(last_page_read, handbook.total_pages),
        },
    )
    .await?;

    tracing::debug!(
        "Progress for student {} on {}: page {} ({}%)",
        student.id,
        handbook.id,
        progress.last_page_read,
        progress.completion_percentage
    );
    Ok(ApiResponse::data(progress).with_message("Progress updated"))
}

pub async fn get_progress(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
    Path(handbook_id): Path<String>,
) -> ApiResult<ApiResponse<Option<ProgressDetail>>> {
    // An id that is not a UUID cannot have a record.
    let progress = match uuid::Uuid::parse_str(handbook_id.trim()) {
        Ok(id) => find_progress(&state.db, student.id, id).await?,
        Err(_) => None,
    };

    Ok(match progress {
        Some(detail) => ApiResponse::data(Some(detail)),
        None => ApiResponse::data(None).with_message("No progress found for this handbook"),
    })
}
