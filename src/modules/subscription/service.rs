use anyhow::Context;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

/// One fixed offset for every path that grants a subscription, including
/// the admin force-subscribe path.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

pub struct SubscriptionService;

impl SubscriptionService {
    /// Turn the subscription on and push the expiry out 30 days.
    /// Re-activation simply resets the expiry; there is no transactional
    /// guard against concurrent double-activation (the outcome is the
    /// same timestamp give or take milliseconds).
    #[instrument(skip(db))]
    pub async fn activate(db: &PgPool, user_id: &str) -> Result<User, AppError> {
        UserService::get_user(db, user_id).await?;

        let subscription_ends = Utc::now() + Duration::days(SUBSCRIPTION_PERIOD_DAYS);

        let user = sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET is_subscribed = TRUE, subscription_ends = $1, updated_at = NOW()
               WHERE id = $2
               RETURNING id, email, is_subscribed, subscription_ends, created_at, updated_at"#,
        )
        .bind(subscription_ends)
        .bind(user_id)
        .fetch_one(db)
        .await
        .context("Failed to activate subscription")
        .map_err(AppError::database)?;

        Ok(user)
    }

    /// Current subscription state, correcting an expired record on the
    /// way out. This is a deliberately side-effecting read: expiry is
    /// enforced lazily at observation time, not by a background sweep.
    #[instrument(skip(db))]
    pub async fn status(db: &PgPool, user_id: &str) -> Result<User, AppError> {
        let user = UserService::get_user(db, user_id).await?;

        if let Some(ends) = user.subscription_ends
            && ends < Utc::now()
        {
            let user = sqlx::query_as::<_, User>(
                r#"UPDATE users
                   SET is_subscribed = FALSE, subscription_ends = NULL, updated_at = NOW()
                   WHERE id = $1
                   RETURNING id, email, is_subscribed, subscription_ends, created_at, updated_at"#,
            )
            .bind(user_id)
            .fetch_one(db)
            .await
            .context("Failed to clear expired subscription")
            .map_err(AppError::database)?;

            return Ok(user);
        }

        Ok(user)
    }
}
