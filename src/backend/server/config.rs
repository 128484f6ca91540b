/**
 * Database Setup
 *
 * Opens the SQLite pool described by `DATABASE_URL` and brings the schema
 * up to date with the embedded migrations.
 *
 * # Error Handling
 *
 * Unlike optional services, the database is required: a connection or
 * migration failure aborts startup.
 */

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::backend::server::error::ServerError;

const MAX_CONNECTIONS: u32 = 5;

/// Connect to `database_url` and run pending migrations.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, ServerError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            e
        })?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ServerError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
