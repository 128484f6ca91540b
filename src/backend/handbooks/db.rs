/**
 * Handbook Model and Database Operations
 *
 * The catalog of uploaded PDF handbooks. Every handbook belongs to one
 * track; students only ever see their own track's handbooks.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::shared::types::Track;

/// Handbook struct representing a row of `handbooks`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Handbook {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub track: Track,
    pub file_path: String,
    pub file_name: String,
    pub total_pages: i64,
    pub view_count: i64,
    pub upload_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What students see in catalog listings
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HandbookSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub total_pages: i64,
    pub view_count: i64,
    pub upload_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHandbook {
    pub title: String,
    pub description: Option<String>,
    pub track: Track,
    pub file_path: String,
    pub file_name: String,
    pub total_pages: i64,
}

/// Partial update; `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct HandbookChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub total_pages: Option<i64>,
}

const HANDBOOK_COLUMNS: &str = "id, title, description, track, file_path, file_name, total_pages, \
     view_count, upload_date, created_at, updated_at";

pub async fn insert_handbook(pool: &SqlitePool, new: NewHandbook) -> Result<Handbook, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Handbook>(&format!(
        r#"
        INSERT INTO handbooks (id, title, description, track, file_path, file_name, total_pages, view_count, upload_date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)
        RETURNING {HANDBOOK_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.track)
    .bind(&new.file_path)
    .bind(&new.file_name)
    .bind(new.total_pages)
    .bind(now)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_handbook(pool: &SqlitePool, id: Uuid) -> Result<Option<Handbook>, sqlx::Error> {
    sqlx::query_as::<_, Handbook>(&format!("SELECT {HANDBOOK_COLUMNS} FROM handbooks WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All handbooks, optionally for one track, newest upload first.
pub async fn list_handbooks(pool: &SqlitePool, track: Option<Track>) -> Result<Vec<Handbook>, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!("SELECT {HANDBOOK_COLUMNS} FROM handbooks"));
    if let Some(track) = track {
        query.push(" WHERE track = ").push_bind(track);
    }
    query.push(" ORDER BY upload_date DESC");
    query.build_query_as::<Handbook>().fetch_all(pool).await
}

/// Catalog summaries for one track, newest upload first.
pub async fn list_summaries_for_track(
    pool: &SqlitePool,
    track: Track,
) -> Result<Vec<HandbookSummary>, sqlx::Error> {
    sqlx::query_as::<_, HandbookSummary>(
        r#"
        SELECT id, title, description, total_pages, view_count, upload_date
        FROM handbooks
        WHERE track = ?
        ORDER BY upload_date DESC
        "#,
    )
    .bind(track)
    .fetch_all(pool)
    .await
}

/// Apply `changes`, returning the updated row or `None` if absent.
pub async fn update_handbook(
    pool: &SqlitePool,
    id: Uuid,
    changes: HandbookChanges,
) -> Result<Option<Handbook>, sqlx::Error> {
    sqlx::query_as::<_, Handbook>(&format!(
        r#"
        UPDATE handbooks SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            total_pages = COALESCE(?, total_pages),
            updated_at = ?
        WHERE id = ?
        RETURNING {HANDBOOK_COLUMNS}
        "#
    ))
    .bind(changes.title)
    .bind(changes.description)
    .bind(changes.total_pages)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Count one view and return the handbook as it is afterwards.
pub async fn record_view(pool: &SqlitePool, id: Uuid) -> Result<Option<Handbook>, sqlx::Error> {
    sqlx::query_as::<_, Handbook>(&format!(
        "UPDATE handbooks SET view_count = view_count + 1 WHERE id = ? RETURNING {HANDBOOK_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a handbook and every progress row that points at it.
pub async fn delete_handbook(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM reading_progress WHERE handbook_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM handbooks WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}
