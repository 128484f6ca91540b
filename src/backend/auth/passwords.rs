/**
 * Password Hashing
 *
 * bcrypt hashing and verification. Both are CPU bound and run on the
 * blocking pool so they never stall the async workers.
 */

use std::sync::OnceLock;

use crate::backend::error::ApiResult;

/// Hash a plaintext password with the configured bcrypt cost.
pub async fn hash_password(plain: String, cost: u32) -> ApiResult<String> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost)).await??;
    Ok(hashed)
}

/// Compare a plaintext password against a stored bcrypt hash.
pub async fn verify_password(plain: String, hash: String) -> ApiResult<bool> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash)).await??;
    Ok(matches)
}

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Run a verification that always fails, at the same cost as a real one.
///
/// Login calls this for unknown emails so the response time does not
/// reveal whether an account exists.
pub async fn verify_against_dummy(plain: String, cost: u32) {
    let outcome = tokio::task::spawn_blocking(move || {
        let hash = DUMMY_HASH
            .get_or_init(|| bcrypt::hash("dummy-password-for-timing", cost).unwrap_or_default());
        bcrypt::verify(plain, hash).unwrap_or(false)
    })
    .await;

    if let Err(e) = outcome {
        tracing::warn!("Dummy password verification task failed: {:?}", e);
    }
}
