use std::env;

/// Identity-provider settings: the shared secret session tokens are
/// verified against, and the backend API used for role-claim lookups.
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub session_secret: String,
    /// Token lifetime in seconds, used when minting tokens locally (tests, tooling)
    pub session_expiry: i64,
    pub api_url: String,
    pub api_key: String,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            session_expiry: env::var("SESSION_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            api_url: env::var("IDENTITY_API_URL")
                .unwrap_or_else(|_| "https://api.identity.local".to_string()),
            api_key: env::var("IDENTITY_API_KEY").unwrap_or_default(),
        }
    }
}
