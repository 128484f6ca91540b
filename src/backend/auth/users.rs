/**
 * Student Model and Database Operations
 *
 * This module handles student accounts: the read model returned to
 * clients, the credential form used only by login, and every query the
 * handlers and the guard run against the `students` table.
 *
 * Emails are normalized (trimmed, lower-cased) before they reach any
 * query, so uniqueness is case-insensitive.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::passwords::hash_password;
use crate::backend::error::{ApiError, ApiResult};
use crate::shared::types::{StudentStatus, Track};

/// Student struct representing a row of `students` without its hash
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub track: Track,
    pub status: StudentStatus,
    pub registration_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Student {
    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

/// Student plus password hash. Only login asks for this form.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentCredentials {
    #[sqlx(flatten)]
    pub student: Student,
    pub password_hash: String,
}

/// Attributes for a new registration; `password` is plaintext until hashed.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub email: String,
    pub whatsapp_number: String,
    pub password: String,
    pub track: Track,
}

/// Optional filters for the admin listing
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub track: Option<Track>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

const STUDENT_COLUMNS: &str =
    "id, full_name, email, whatsapp_number, track, status, registration_date, last_login";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create a new student, hashing the password first.
///
/// Fails with `Email already registered` if the unique index rejects the
/// row, which also covers a concurrent registration racing the handler's
/// own existence check.
pub async fn create_student(pool: &SqlitePool, new: NewStudent, cost: u32) -> ApiResult<Student> {
    let password_hash = hash_password(new.password, cost).await?;
    let id = Uuid::new_v4();
    let now = Utc::now();

    let student = sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students (id, full_name, email, whatsapp_number, password_hash, track, status, registration_date)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(new.full_name.trim())
    .bind(normalize_email(&new.email))
    .bind(new.whatsapp_number.trim())
    .bind(&password_hash)
    .bind(new.track)
    .bind(StudentStatus::Active)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return ApiError::bad_request("Email already registered");
            }
        }
        ApiError::from(e)
    })?;

    Ok(student)
}

/// Get student by ID
pub async fn find_student_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get student by email
pub async fn find_student_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE email = ?"))
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await
}

/// Get student and password hash by email
pub async fn find_student_credentials(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<StudentCredentials>, sqlx::Error> {
    sqlx::query_as::<_, StudentCredentials>(&format!(
        "SELECT {STUDENT_COLUMNS}, password_hash FROM students WHERE email = ?"
    ))
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await
}

/// Set a student's status. `None` if no such student.
pub async fn update_student_status(
    pool: &SqlitePool,
    id: Uuid,
    status: StudentStatus,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "UPDATE students SET status = ? WHERE id = ? RETURNING {STUDENT_COLUMNS}"
    ))
    .bind(status)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn touch_last_login(pool: &SqlitePool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE students SET last_login = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a student and their reading progress in one transaction.
///
/// Returns `false` when the student did not exist.
pub async fn delete_student(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM reading_progress WHERE user_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;
    Ok(deleted > 0)
}

/// List students matching `filter`, newest registration first.
pub async fn list_students(pool: &SqlitePool, filter: &StudentFilter) -> Result<Vec<Student>, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {STUDENT_COLUMNS} FROM students WHERE 1 = 1"));

    if let Some(track) = filter.track {
        query.push(" AND track = ").push_bind(track);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status);
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        query
            .push(" AND (LOWER(full_name) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR LOWER(email) LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    query.push(" ORDER BY registration_date DESC");

    query.build_query_as::<Student>().fetch_all(pool).await
}

/// Escape LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
