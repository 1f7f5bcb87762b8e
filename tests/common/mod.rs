#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::PgPool;

use taskgate::config::cors::CorsConfig;
use taskgate::config::identity::IdentityConfig;
use taskgate::config::webhook::WebhookConfig;
use taskgate::identity::{IdentityProvider, Role};
use taskgate::router::init_router;
use taskgate::state::AppState;
use taskgate::utils::errors::AppError;
use taskgate::utils::jwt::create_session_token;

/// Valid svix-style secret (whsec_ + base64) shared by webhook tests.
pub const TEST_WEBHOOK_SECRET: &str = "whsec_dGVzdHNpZ25pbmdzZWNyZXQxMjM0NTY3ODkwYWJjZGVm";

/// In-memory replacement for the identity provider's role lookup.
/// Lookups for ids in `fail_for` error out, standing in for a provider
/// outage.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    admins: HashSet<String>,
    fail_for: HashSet<String>,
}

impl StaticIdentityProvider {
    pub fn with_admins(admins: &[&str]) -> Self {
        Self {
            admins: admins.iter().map(|id| id.to_string()).collect(),
            fail_for: HashSet::new(),
        }
    }

    pub fn failing_for(user_ids: &[&str]) -> Self {
        Self {
            admins: HashSet::new(),
            fail_for: user_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn fetch_role(&self, user_id: &str) -> Result<Role, AppError> {
        if self.fail_for.contains(user_id) {
            return Err(AppError::internal(anyhow::anyhow!(
                "identity provider unavailable"
            )));
        }
        if self.admins.contains(user_id) {
            Ok(Role::Admin)
        } else {
            Ok(Role::Member)
        }
    }
}

pub fn test_identity_config() -> IdentityConfig {
    IdentityConfig {
        session_secret: "test-session-secret".to_string(),
        session_expiry: 3600,
        api_url: "http://localhost:9100".to_string(),
        api_key: "test-api-key".to_string(),
    }
}

pub fn setup_test_app(pool: PgPool, admins: &[&str]) -> axum::Router {
    setup_test_app_with_provider(pool, StaticIdentityProvider::with_admins(admins))
}

pub fn setup_test_app_with_provider(
    pool: PgPool,
    provider: StaticIdentityProvider,
) -> axum::Router {
    let state = AppState {
        db: pool,
        identity_config: test_identity_config(),
        webhook_config: WebhookConfig {
            secret: TEST_WEBHOOK_SECRET.to_string(),
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        identity: Arc::new(provider),
    };
    init_router(state)
}

/// Session token a browser or API client would carry for this user.
pub fn session_token(user_id: &str, email: &str) -> String {
    create_session_token(user_id, email, &test_identity_config()).unwrap()
}

pub async fn seed_user(pool: &PgPool, id: &str, email: &str, subscribed: bool) {
    sqlx::query("INSERT INTO users (id, email, is_subscribed) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(subscribed)
        .execute(pool)
        .await
        .unwrap();
}

pub fn authed_request(method: &str, uri: &str, token: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
