/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The SQLite connection pool
 * - The token service (signing keys and expiry)
 * - The immutable configuration
 * - The mailer
 * - The per-IP rate limiter and the trusted proxy set
 *
 * Everything in it is either cheap to clone or behind an `Arc`; none of it
 * is mutated after startup except the limiter's internal buckets.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::sessions::TokenService;
use crate::backend::email::Mailer;
use crate::backend::middleware::rate_limit::{build_limiter, IpRateLimiter, RateLimitState, TrustedProxies};
use crate::backend::server::error::ServerError;
use crate::shared::config::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Issues and verifies session tokens
    pub tokens: Arc<TokenService>,

    /// Configuration loaded at startup
    pub config: Arc<AppConfig>,

    /// Outbound mail; a no-op when email is disabled
    pub mailer: Mailer,

    /// Request limiter for `/api`
    pub limiter: Arc<IpRateLimiter>,

    /// Peers whose forwarded-for header is believed
    pub proxies: TrustedProxies,
}

impl AppState {
    pub fn new(config: AppConfig, db: SqlitePool) -> Result<Self, ServerError> {
        let mailer = Mailer::from_settings(&config.email)?;
        Self::with_mailer(config, db, mailer)
    }

    /// Same as `new` with an explicit mailer.
    pub fn with_mailer(config: AppConfig, db: SqlitePool, mailer: Mailer) -> Result<Self, ServerError> {
        let limiter = build_limiter(&config.rate_limit).ok_or_else(|| {
            ServerError::InvalidSetup("rate limit must allow at least one request per window".into())
        })?;

        let config_proxies = config.trusted_proxies.clone();

        Ok(Self {
            db,
            tokens: Arc::new(TokenService::new(&config.jwt_secret, config.jwt_expiry)),
            config: Arc::new(config),
            mailer,
            limiter: Arc::new(limiter),
            proxies: TrustedProxies::new(config_proxies),
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Mailer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for RateLimitState {
    fn from_ref(app_state: &AppState) -> Self {
        RateLimitState {
            limiter: app_state.limiter.clone(),
            proxies: app_state.proxies.clone(),
        }
    }
}
