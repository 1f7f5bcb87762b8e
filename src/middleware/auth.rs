use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{SessionClaims, verify_session_token};

/// Extractor that validates the identity-provider session token and
/// provides the caller's claims. Rejects with 401 when the token is
/// missing or invalid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionClaims);

impl AuthUser {
    /// Identity-provider subject of the caller.
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_session_token(token, &state.identity_config)?;

        Ok(AuthUser(claims))
    }
}
