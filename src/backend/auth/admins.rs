/**
 * Admin Model and Database Operations
 *
 * Admins are created only by the startup seed and have no status gate.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::users::normalize_email;
use crate::backend::error::ApiResult;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminCredentials {
    #[sqlx(flatten)]
    pub admin: Admin,
    pub password_hash: String,
}

const ADMIN_COLUMNS: &str = "id, name, email, role, created_at";

/// Create an admin, hashing the password first.
pub async fn create_admin(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: String,
    role: &str,
    cost: u32,
) -> ApiResult<Admin> {
    let password_hash = hash_password(password, cost).await?;

    let admin = sqlx::query_as::<_, Admin>(&format!(
        r#"
        INSERT INTO admins (id, name, email, password_hash, role, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {ADMIN_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(normalize_email(email))
    .bind(&password_hash)
    .bind(role)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(admin)
}

pub async fn find_admin_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_admin_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
    sqlx::query_as::<_, Admin>(&format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE email = ?"))
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await
}

/// Admin plus password hash, for login only
pub async fn find_admin_credentials(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<AdminCredentials>, sqlx::Error> {
    sqlx::query_as::<_, AdminCredentials>(&format!(
        "SELECT {ADMIN_COLUMNS}, password_hash FROM admins WHERE email = ?"
    ))
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await
}
