/**
 * Session Tokens
 *
 * This module issues and verifies the signed, self-contained session tokens
 * (HS256 JWTs) that every guarded route requires. Tokens carry the subject
 * id and its role tag; nothing is stored server-side, so a token lives until
 * its expiry.
 */

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::shared::types::Role;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub id: Uuid,
    /// Role tag the token was issued for
    #[serde(rename = "type")]
    pub role: Role,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Expiration time (Unix seconds)
    pub exp: u64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed; only possible with a broken key setup
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    /// Bad signature, expired or malformed. Deliberately carries no reason.
    #[error("invalid token")]
    Invalid,
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::internal(format!("token error: {}", err))
    }
}

/// Issues and verifies session tokens with a process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, expiry: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry,
        }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Create a token for `subject` acting as `role`.
    pub fn issue(&self, subject: Uuid, role: Role) -> Result<String, TokenError> {
        let now = unix_now();
        let claims = Claims {
            id: subject,
            role,
            iat: now,
            exp: now.saturating_add(self.expiry.as_secs()),
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims. `issue` is the normal entry point.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding)?)
    }

    /// Verify signature, expiry and shape, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e.kind());
                TokenError::Invalid
            })
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
