use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::identity::IdentityConfig;
use crate::utils::errors::AppError;

/// Claims carried by an identity-provider session token.
///
/// The role claim is intentionally absent: it lives in the provider's
/// stored user metadata and is fetched per request, never cached in the
/// token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity-provider subject (user identifier)
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Mint a session token. Production tokens come from the identity
/// provider itself; this is used by tests and local tooling.
pub fn create_session_token(
    user_id: &str,
    email: &str,
    config: &IdentityConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + config.session_expiry,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verify a session token against the provider's shared secret.
pub fn verify_session_token(
    token: &str,
    config: &IdentityConfig,
) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.session_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired session token".to_string()))
}
