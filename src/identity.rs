//! Identity-provider client.
//!
//! Session tokens are verified locally (see [`crate::utils::jwt`]), but the
//! role claim lives in the provider's stored user metadata and is fetched
//! over HTTP per request. The lookup sits behind a trait so tests can
//! substitute a static provider.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::identity::IdentityConfig;
use crate::utils::errors::AppError;

/// Role claim stored in the provider's user metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Anything other than an explicit "admin" claim is an ordinary member.
    pub fn from_metadata(value: Option<&str>) -> Self {
        match value {
            Some("admin") => Role::Admin,
            _ => Role::Member,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Fetch the stored role claim for a user identifier.
    ///
    /// Evaluated per request, never cached, so role changes at the
    /// provider take effect immediately.
    async fn fetch_role(&self, user_id: &str) -> Result<Role, AppError>;
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    #[serde(default)]
    public_metadata: ProviderMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct ProviderMetadata {
    role: Option<String>,
}

/// Role lookups against the provider's backend API
/// (`GET {api_url}/v1/users/{id}` with a bearer API key).
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn fetch_role(&self, user_id: &str) -> Result<Role, AppError> {
        let url = format!("{}/v1/users/{}", self.api_url, user_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(AppError::internal)?;

        if !response.status().is_success() {
            return Err(AppError::internal(anyhow::anyhow!(
                "Identity provider returned {} for user lookup",
                response.status()
            )));
        }

        let user: ProviderUser = response.json().await.map_err(AppError::internal)?;

        Ok(Role::from_metadata(user.public_metadata.role.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_metadata() {
        assert_eq!(Role::from_metadata(Some("admin")), Role::Admin);
        assert_eq!(Role::from_metadata(Some("member")), Role::Member);
        assert_eq!(Role::from_metadata(Some("")), Role::Member);
        assert_eq!(Role::from_metadata(None), Role::Member);
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Member.is_admin());
    }

    #[test]
    fn test_provider_user_deserialization() {
        let user: ProviderUser =
            serde_json::from_str(r#"{"public_metadata":{"role":"admin"}}"#).unwrap();
        assert_eq!(user.public_metadata.role.as_deref(), Some("admin"));

        // Users without metadata are ordinary members
        let user: ProviderUser = serde_json::from_str(r#"{}"#).unwrap();
        assert!(user.public_metadata.role.is_none());
    }
}
