/**
 * Admin Student Management
 *
 * - `GET /api/admin/students?track=&status=&search=`
 * - `GET /api/admin/students/{id}` - student plus reading progress
 * - `PUT /api/admin/students/{id}` - `{ "status": "active" | "suspended" }`
 * - `DELETE /api/admin/students/{id}` - student and their progress
 */

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{
    delete_student as delete_student_record, find_student_by_id, list_students, update_student_status, Student,
    StudentFilter,
};
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::{parse_id, ApiJson};
use crate::backend::handbooks::handlers::parse_track_filter;
use crate::backend::middleware::auth::CurrentAdmin;
use crate::backend::progress::db::{list_progress_for_user, ProgressDetail};
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::types::StudentStatus;

const STUDENT_NOT_FOUND: &str = "Student not found";

#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    pub track: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl StudentQuery {
    fn into_filter(self) -> ApiResult<StudentFilter> {
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<StudentStatus>()?),
            None => None,
        };
        Ok(StudentFilter {
            track: parse_track_filter(self.track.as_deref())?,
            status,
            search: self.search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        })
    }
}

pub async fn get_students(
    State(state): State<AppState>,
    Query(query): Query<StudentQuery>,
) -> ApiResult<ApiResponse<Vec<Student>>> {
    let filter = query.into_filter()?;
    let students = list_students(&state.db, &filter).await?;
    Ok(ApiResponse::list(students))
}

#[derive(Debug, Serialize)]
pub struct StudentDetail {
    pub student: Student,
    pub progress: Vec<ProgressDetail>,
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<StudentDetail>> {
    let id = parse_id(&id, "Student")?;
    let student = find_student_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(STUDENT_NOT_FOUND))?;
    let progress = list_progress_for_user(&state.db, student.id).await?;

    Ok(ApiResponse::data(StudentDetail { student, progress }))
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusRequest {
    pub status: Option<String>,
}

pub async fn update_student(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> ApiResult<ApiResponse<Student>> {
    let status = request
        .status
        .as_deref()
        .and_then(|raw| raw.parse::<StudentStatus>().ok())
        .ok_or_else(|| ApiError::bad_request("Invalid status value"))?;

    let id = parse_id(&id, "Student")?;
    let student = update_student_status(&state.db, id, status)
        .await?
        .ok_or_else(|| ApiError::not_found(STUDENT_NOT_FOUND))?;

    tracing::info!("Admin {} set student {} to {}", admin.email, student.id, status);
    Ok(ApiResponse::data(student).with_message("Student status updated"))
}

pub async fn delete_student(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<()>> {
    let id = parse_id(&id, "Student")?;
    if !delete_student_record(&state.db, id).await? {
        return Err(ApiError::not_found(STUDENT_NOT_FOUND));
    }

    tracing::info!("Admin {} deleted student {}", admin.email, id);
    Ok(ApiResponse::message("Student deleted successfully"))
}
