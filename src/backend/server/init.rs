/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, seeding, state creation and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database and run migrations
 * 2. Make sure the upload directory exists
 * 3. Seed the admin account
 * 4. Build the application state
 * 5. Start the rate limiter cleanup task
 * 6. Create and configure the router
 */

use axum::Router;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::backend::email::Mailer;
use crate::backend::middleware::rate_limit::spawn_cleanup;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::error::ServerError;
use crate::backend::server::seed::seed_admin;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application from `config`.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, ServerError> {
    tracing::info!("Initializing SkillForge backend server");

    let db = load_database(&config.database_url).await?;
    let mailer = Mailer::from_settings(&config.email)?;
    build_app(config, db, mailer).await
}

/// Assemble the application on an already migrated pool.
pub async fn build_app(config: AppConfig, db: SqlitePool, mailer: Mailer) -> Result<Router<()>, ServerError> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    tracing::info!("Uploads stored in {}", config.upload_dir.display());

    seed_admin(&db, &config).await;

    let app_state = AppState::with_mailer(config, db, mailer)?;

    spawn_cleanup(app_state.limiter.clone(), LIMITER_CLEANUP_INTERVAL);

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}
