use std::sync::Arc;

use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::identity::IdentityConfig;
use crate::config::webhook::WebhookConfig;
use crate::identity::{HttpIdentityProvider, IdentityProvider};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub identity_config: IdentityConfig,
    pub webhook_config: WebhookConfig,
    pub cors_config: CorsConfig,
    pub identity: Arc<dyn IdentityProvider>,
}

pub async fn init_app_state() -> AppState {
    let identity_config = IdentityConfig::from_env();
    let identity = Arc::new(HttpIdentityProvider::new(&identity_config));

    AppState {
        db: init_db_pool().await,
        identity_config,
        webhook_config: WebhookConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        identity,
    }
}
