use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::prelude::FromRow;
use utoipa::ToSchema;

/// A provisioned user. The id is the identity-provider subject; rows are
/// created exactly once, by the provisioning webhook.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub is_subscribed: bool,
    pub subscription_ends: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
