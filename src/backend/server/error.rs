//! Startup errors
//!
//! Everything that can stop the server from coming up. Request-time
//! failures use `ApiError` instead.

use thiserror::Error;

use crate::backend::email::EmailError;
use crate::shared::config::ConfigError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("email setup failed: {0}")]
    Email(#[from] EmailError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid setup: {0}")]
    InvalidSetup(String),
}
