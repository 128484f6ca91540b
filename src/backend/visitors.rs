//! Landing page visitor counting
//!
//! One row per client address. A repeat visit bumps the counter and
//! refreshes the user agent.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub unique_visitors: i64,
    pub total_visits: i64,
}

pub async fn record_visit(pool: &SqlitePool, ip: &str, user_agent: Option<&str>) -> Result<(), sqlx::Error> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO visitors (ip, user_agent, visit_count, first_visited, last_visited)
        VALUES (?, ?, 1, ?, ?)
        ON CONFLICT (ip) DO UPDATE SET
            visit_count = visit_count + 1,
            user_agent = excluded.user_agent,
            last_visited = excluded.last_visited
        "#,
    )
    .bind(ip)
    .bind(user_agent)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn visitor_stats(pool: &SqlitePool) -> Result<VisitorStats, sqlx::Error> {
    sqlx::query_as::<_, VisitorStats>(
        "SELECT COUNT(*) AS unique_visitors, COALESCE(SUM(visit_count), 0) AS total_visits FROM visitors",
    )
    .fetch_one(pool)
    .await
}
