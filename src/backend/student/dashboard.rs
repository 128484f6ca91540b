//! `GET /api/student/dashboard`: the caller's profile basics, their track's
//! handbooks and their reading progress in one response.

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::error::ApiResult;
use crate::backend::handbooks::db::{list_summaries_for_track, HandbookSummary};
use crate::backend::middleware::auth::CurrentStudent;
use crate::backend::progress::db::{list_progress_for_user, ProgressDetail};
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::types::Track;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStudent {
    pub full_name: String,
    pub track: Track,
    pub registration_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub student: DashboardStudent,
    pub handbooks: Vec<HandbookSummary>,
    pub progress: Vec<ProgressDetail>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentStudent(student): CurrentStudent,
) -> ApiResult<ApiResponse<Dashboard>> {
    let handbooks = list_summaries_for_track(&state.db, student.track).await?;
    let progress = list_progress_for_user(&state.db, student.id).await?;

    Ok(ApiResponse::data(Dashboard {
        student: DashboardStudent {
            full_name: student.full_name,
            track: student.track,
            registration_date: student.registration_date,
        },
        handbooks,
        progress,
    }))
}
