//! Database and application fixtures
//!
//! Every test gets its own in-memory SQLite database and its own upload and
//! public directories, so tests can run in parallel without cleanup.

use axum::Router;
use axum_test::TestServer;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tempfile::TempDir;

use skillforge::backend::email::Mailer;
use skillforge::backend::server::build_app;
use skillforge::backend::server::config::run_migrations;
use skillforge::shared::config::{AppConfig, AppConfigBuilder, RateLimitSettings};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const SEED_ADMIN_EMAIL: &str = "admin@skillforge.test";
pub const SEED_ADMIN_PASSWORD: &str = "admin-password";
pub const LANDING_PAGE: &str = "<html><body>SkillForge test landing</body></html>";

/// Create a migrated in-memory pool.
///
/// A single connection that never expires keeps the in-memory database
/// alive for the whole test.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create test database pool");

    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Config for tests: cheap bcrypt, a generous rate limit, a seeded admin.
pub fn test_config_builder(uploads: &TempDir, public: &TempDir) -> AppConfigBuilder {
    AppConfig::builder()
        .jwt_secret(TEST_JWT_SECRET)
        .bcrypt_cost(4)
        .admin_seed(SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD)
        .upload_dir(uploads.path())
        .public_dir(public.path())
        .max_upload_bytes(2 * 1024 * 1024)
        .rate_limit(RateLimitSettings {
            max_requests: 10_000,
            window: Duration::from_secs(60),
        })
}

/// A running application with direct access to its database.
pub struct TestApp {
    pub server: TestServer,
    /// The same router, for driving requests with `tower::ServiceExt`
    pub router: Router,
    pub pool: SqlitePool,
    pub config: AppConfig,
    pub uploads: TempDir,
    _public: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|builder| builder).await
    }

    /// Build the app after letting the caller adjust the test config.
    pub async fn with_config(adjust: impl FnOnce(AppConfigBuilder) -> AppConfigBuilder) -> Self {
        let uploads = TempDir::new().expect("upload dir");
        let public = TempDir::new().expect("public dir");
        std::fs::write(public.path().join("index.html"), LANDING_PAGE).expect("write landing page");

        let config = adjust(test_config_builder(&uploads, &public))
            .build()
            .expect("valid test config");
        let pool = create_test_pool().await;

        let app = build_app(config.clone(), pool.clone(), Mailer::disabled())
            .await
            .expect("app builds");
        let server = TestServer::new(app.clone()).expect("test server");

        Self {
            server,
            router: app,
            pool,
            config,
            uploads,
            _public: public,
        }
    }
}
