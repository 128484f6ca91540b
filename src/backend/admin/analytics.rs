//! `GET /api/admin/analytics`
//!
//! Aggregate counts over students, handbooks and landing-page visitors.
//! Monthly registration buckets are built in Rust from the raw timestamps
//! so the grouping follows UTC calendar months exactly.

use std::collections::BTreeMap;

use axum::extract::State;
use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::backend::error::ApiResult;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::backend::visitors::{visitor_stats, VisitorStats};
use crate::shared::types::Track;

const RECENT_REGISTRATION_DAYS: i64 = 30;
const ACTIVE_STUDENT_DAYS: i64 = 7;
const TREND_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TrackCount {
    pub track: Track,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_students: i64,
    pub students_by_track: Vec<TrackCount>,
    pub total_handbooks: i64,
    pub recent_registrations: i64,
    pub active_students: i64,
    pub total_handbook_views: i64,
    pub registrations_trend: Vec<MonthCount>,
    pub visitors: VisitorStats,
}

async fn count(pool: &SqlitePool, sql: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await
}

async fn count_since(pool: &SqlitePool, column: &str, since: DateTime<Utc>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM students WHERE {column} >= ?"))
        .bind(since)
        .fetch_one(pool)
        .await
}

/// Group registration timestamps by calendar month, oldest month first.
/// Months without registrations are left out.
pub fn monthly_buckets(dates: &[DateTime<Utc>]) -> Vec<MonthCount> {
    let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
    for date in dates {
        *buckets.entry((date.year(), date.month())).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|((year, month), count)| MonthCount { year, month, count })
        .collect()
}

pub async fn collect_analytics(pool: &SqlitePool, now: DateTime<Utc>) -> Result<Analytics, sqlx::Error> {
    let total_students = count(pool, "SELECT COUNT(*) FROM students").await?;
    let total_handbooks = count(pool, "SELECT COUNT(*) FROM handbooks").await?;
    let total_handbook_views = count(pool, "SELECT COALESCE(SUM(view_count), 0) FROM handbooks").await?;

    let students_by_track = sqlx::query_as::<_, TrackCount>(
        "SELECT track, COUNT(*) AS count FROM students GROUP BY track ORDER BY track",
    )
    .fetch_all(pool)
    .await?;

    let recent_registrations =
        count_since(pool, "registration_date", now - Duration::days(RECENT_REGISTRATION_DAYS)).await?;
    let active_students = count_since(pool, "last_login", now - Duration::days(ACTIVE_STUDENT_DAYS)).await?;

    let trend_start = now.checked_sub_months(Months::new(TREND_MONTHS)).unwrap_or(now);
    let registration_dates = sqlx::query_scalar::<_, DateTime<Utc>>(
        "SELECT registration_date FROM students WHERE registration_date >= ?",
    )
    .bind(trend_start)
    .fetch_all(pool)
    .await?;

    Ok(Analytics {
        total_students,
        students_by_track,
        total_handbooks,
        recent_registrations,
        active_students,
        total_handbook_views,
        registrations_trend: monthly_buckets(&registration_dates),
        visitors: visitor_stats(pool).await?,
    })
}

pub async fn get_analytics(State(state): State<AppState>) -> ApiResult<ApiResponse<Analytics>> {
    let analytics = collect_analytics(&state.db, Utc::now()).await?;
    Ok(ApiResponse::data(analytics))
}
