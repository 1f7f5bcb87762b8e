use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::todos::model::Todo;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

/// Unsubscribed users may hold at most this many todos, completed ones
/// included. Checked at creation time only; a later downgrade does not
/// delete anything.
pub const FREE_TIER_QUOTA: i64 = 3;

const TODO_COLUMNS: &str = "id, title, completed, user_id, created_at";

pub struct TodoService;

impl TodoService {
    /// One page of the owner's todos, newest first, with the total row
    /// count under the same filter.
    #[instrument(skip(db))]
    pub async fn list_todos(
        db: &PgPool,
        user_id: &str,
        limit: i64,
        offset: i64,
        search: Option<&str>,
    ) -> Result<(Vec<Todo>, i64), AppError> {
        // ILIKE '%%' matches every title, so the unfiltered case needs no
        // separate query
        let pattern = format!("%{}%", search.unwrap_or(""));

        let todos = sqlx::query_as::<_, Todo>(&format!(
            r#"SELECT {TODO_COLUMNS} FROM todos
               WHERE user_id = $1 AND title ILIKE $2
               ORDER BY created_at DESC
               LIMIT $3 OFFSET $4"#
        ))
        .bind(user_id)
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch todos")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND title ILIKE $2",
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(db)
        .await
        .context("Failed to count todos")
        .map_err(AppError::database)?;

        Ok((todos, total))
    }

    /// Create a todo for the caller, enforcing the free-tier quota.
    ///
    /// The quota check and the insert are two round trips with no
    /// transaction; two concurrent creates can both pass the check. The
    /// quota is a business rule, not a correctness-critical invariant,
    /// so the race is accepted rather than locked.
    #[instrument(skip(db))]
    pub async fn create_todo(db: &PgPool, user_id: &str, title: &str) -> Result<Todo, AppError> {
        let user = UserService::get_user(db, user_id).await?;

        if !user.is_subscribed {
            let count = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM todos WHERE user_id = $1",
            )
            .bind(user_id)
            .fetch_one(db)
            .await
            .context("Failed to count todos for quota check")
            .map_err(AppError::database)?;

            if count >= FREE_TIER_QUOTA {
                return Err(AppError::forbidden(
                    "Free users can only create up to 3 todos. Please subscribe for more."
                        .to_string(),
                ));
            }
        }

        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (title, user_id) VALUES ($1, $2) RETURNING {TODO_COLUMNS}"
        ))
        .bind(title)
        .bind(user_id)
        .fetch_one(db)
        .await
        .context("Failed to insert todo")
        .map_err(AppError::database)?;

        Ok(todo)
    }

    /// Set the completion flag of a todo owned by the caller.
    /// 404 when absent, 403 when owned by someone else.
    #[instrument(skip(db))]
    pub async fn update_todo(
        db: &PgPool,
        todo_id: Uuid,
        user_id: &str,
        completed: bool,
    ) -> Result<Todo, AppError> {
        let todo = Self::get_todo(db, todo_id).await?;

        if todo.user_id != user_id {
            return Err(AppError::forbidden(
                "You can only modify your own todos".to_string(),
            ));
        }

        let todo = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET completed = $1 WHERE id = $2 RETURNING {TODO_COLUMNS}"
        ))
        .bind(completed)
        .bind(todo_id)
        .fetch_one(db)
        .await
        .context("Failed to update todo")
        .map_err(AppError::database)?;

        Ok(todo)
    }

    /// Remove a todo owned by the caller, with the same ownership check
    /// as [`Self::update_todo`].
    #[instrument(skip(db))]
    pub async fn delete_todo(db: &PgPool, todo_id: Uuid, user_id: &str) -> Result<(), AppError> {
        let todo = Self::get_todo(db, todo_id).await?;

        if todo.user_id != user_id {
            return Err(AppError::forbidden(
                "You can only delete your own todos".to_string(),
            ));
        }

        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(db)
            .await
            .context("Failed to delete todo")
            .map_err(AppError::database)?;

        Ok(())
    }

    async fn get_todo(db: &PgPool, todo_id: Uuid) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"))
            .bind(todo_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch todo")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Todo not found")))
    }
}
