use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::User;
use crate::utils::errors::AppError;

const USER_COLUMNS: &str = "id, email, is_subscribed, subscription_ends, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Provision a user from a verified "user created" event.
    /// Subscription defaults to off.
    #[instrument(skip(db))]
    pub async fn create_user(db: &PgPool, id: &str, email: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(email)
        .fetch_one(db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }
}
