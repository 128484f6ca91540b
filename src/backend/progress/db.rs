/**
 * Reading Progress Model and Database Operations
 *
 * One row per (student, handbook). Writes go through a single
 * `INSERT ... ON CONFLICT DO UPDATE`, so concurrent updates for the same
 * pair can neither duplicate the row nor lose accumulated reading time.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::types::Track;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReadingProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub handbook_id: Uuid,
    pub last_page_read: i64,
    /// Minutes, summed over every update
    pub total_time_spent: i64,
    pub last_accessed: DateTime<Utc>,
    pub completion_percentage: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The handbook fields shown next to a progress record
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HandbookRef {
    #[sqlx(rename = "handbook_ref_id")]
    pub id: Uuid,
    #[sqlx(rename = "handbook_title")]
    pub title: String,
    #[sqlx(rename = "handbook_track")]
    pub track: Track,
    #[sqlx(rename = "handbook_total_pages")]
    pub total_pages: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProgressDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub progress: ReadingProgress,
    #[sqlx(flatten)]
    pub handbook: HandbookRef,
}

/// One progress write from a student
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate {
    pub user_id: Uuid,
    pub handbook_id: Uuid,
    pub last_page_read: i64,
    pub time_spent: i64,
    pub completion_percentage: i64,
}

const PROGRESS_COLUMNS: &str = "id, user_id, handbook_id, last_page_read, total_time_spent, \
     last_accessed, completion_percentage, created_at, updated_at";

const DETAIL_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.handbook_id, p.last_page_read, p.total_time_spent,
           p.last_accessed, p.completion_percentage, p.created_at, p.updated_at,
           h.id AS handbook_ref_id, h.title AS handbook_title,
           h.track AS handbook_track, h.total_pages AS handbook_total_pages
    FROM reading_progress p
    JOIN handbooks h ON h.id = p.handbook_id
"#;

/// `round(last / total * 100)` clamped to 0..=100, or 0 without a page count.
pub fn completion_percentage(last_page_read: i64, total_pages: i64) -> i64 {
    if total_pages <= 0 {
        return 0;
    }
    let percent = (last_page_read as f64 / total_pages as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as i64
}

/// Insert the pair's first record or update the existing one, adding
/// `time_spent` to the running total.
pub async fn upsert_progress(pool: &SqlitePool, update: ProgressUpdate) -> Result<ReadingProgress, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, ReadingProgress>(&format!(
        r#"
        INSERT INTO reading_progress
            (id, user_id, handbook_id, last_page_read, total_time_spent, last_accessed, completion_percentage, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id, handbook_id) DO UPDATE SET
            last_page_read = excluded.last_page_read,
            total_time_spent = reading_progress.total_time_spent + excluded.total_time_spent,
            last_accessed = excluded.last_accessed,
            completion_percentage = excluded.completion_percentage,
            updated_at = excluded.updated_at
        RETURNING {PROGRESS_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(update.user_id)
    .bind(update.handbook_id)
    .bind(update.last_page_read)
    .bind(update.time_spent)
    .bind(now)
    .bind(update.completion_percentage)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// A student's record for one handbook, with handbook details.
pub async fn find_progress(
    pool: &SqlitePool,
    user_id: Uuid,
    handbook_id: Uuid,
) -> Result<Option<ProgressDetail>, sqlx::Error> {
    sqlx::query_as::<_, ProgressDetail>(&format!(
        "{DETAIL_SELECT} WHERE p.user_id = ? AND p.handbook_id = ?"
    ))
    .bind(user_id)
    .bind(handbook_id)
    .fetch_optional(pool)
    .await
}

/// Every record of one student, most recently read first.
pub async fn list_progress_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<ProgressDetail>, sqlx::Error> {
    sqlx::query_as::<_, ProgressDetail>(&format!(
        "{DETAIL_SELECT} WHERE p.user_id = ? ORDER BY p.last_accessed DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_progress_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM reading_progress WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
