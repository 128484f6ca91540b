//! First-run admin account.

use sqlx::SqlitePool;

use crate::backend::auth::admins::{create_admin, find_admin_by_email};
use crate::shared::config::AppConfig;

pub const SEED_ADMIN_NAME: &str = "Super Admin";
pub const SEED_ADMIN_ROLE: &str = "super-admin";

/// Create the configured admin unless one with that email exists.
///
/// Never fails startup; problems are logged.
pub async fn seed_admin(pool: &SqlitePool, config: &AppConfig) {
    let Some(seed) = &config.admin_seed else {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin seeding");
        return;
    };

    match find_admin_by_email(pool, &seed.email).await {
        Ok(Some(_)) => {
            tracing::debug!("Admin {} already exists", seed.email);
        }
        Ok(None) => {
            match create_admin(
                pool,
                SEED_ADMIN_NAME,
                &seed.email,
                seed.password.clone(),
                SEED_ADMIN_ROLE,
                config.bcrypt_cost,
            )
            .await
            {
                Ok(admin) => {
                    tracing::info!("Default admin account created: {}", admin.email);
                    tracing::warn!("Change the seeded admin password after first login");
                }
                Err(e) => tracing::error!("Error seeding admin: {}", e),
            }
        }
        Err(e) => tracing::error!("Error checking for seeded admin: {:?}", e),
    }
}
