use anyhow::Context;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::admin::model::{AdminUpdateDto, AdminUpdateResponse, UserWithTodos};
use crate::modules::subscription::service::SUBSCRIPTION_PERIOD_DAYS;
use crate::modules::todos::model::Todo;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::errors::AppError;

pub struct AdminService;

impl AdminService {
    /// Look up a user by exact email with one page of their todos,
    /// newest first, plus the unfiltered todo count. An unknown email is
    /// `None`, not an error.
    #[instrument(skip(db))]
    pub async fn overview(
        db: &PgPool,
        email: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Option<(UserWithTodos, i64)>, AppError> {
        let Some(user) = UserService::find_by_email(db, email.unwrap_or("")).await? else {
            return Ok(None);
        };

        let todos = sqlx::query_as::<_, Todo>(
            r#"SELECT id, title, completed, user_id, created_at FROM todos
               WHERE user_id = $1
               ORDER BY created_at DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(&user.id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .context("Failed to fetch user's todos")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM todos WHERE user_id = $1")
            .bind(&user.id)
            .fetch_one(db)
            .await
            .context("Failed to count user's todos")
            .map_err(AppError::database)?;

        Ok(Some((UserWithTodos { user, todos }, total)))
    }

    /// Apply a multiplexed admin update: a todo completion toggle when
    /// `todo_id` and `todo_completed` are present, a subscription force
    /// when `email` and `is_subscribed` are; anything else is a 400.
    #[instrument(skip(db))]
    pub async fn update(db: &PgPool, dto: AdminUpdateDto) -> Result<AdminUpdateResponse, AppError> {
        if let (Some(todo_id), Some(completed)) = (dto.todo_id, dto.todo_completed) {
            let todo = Self::set_todo_completed(db, todo_id, completed).await?;
            return Ok(AdminUpdateResponse::Todo(todo));
        }

        if let (Some(email), Some(is_subscribed)) = (dto.email.as_deref(), dto.is_subscribed) {
            let user = Self::force_subscription(db, email, is_subscribed).await?;
            return Ok(AdminUpdateResponse::User(user));
        }

        Err(AppError::bad_request(anyhow::anyhow!("Invalid request")))
    }

    /// Remove a todo by id with no ownership check; the admin gate is
    /// the only guard on this path.
    #[instrument(skip(db))]
    pub async fn delete_todo(db: &PgPool, todo_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(db)
            .await
            .context("Failed to delete todo")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Todo not found")));
        }

        Ok(())
    }

    async fn set_todo_completed(
        db: &PgPool,
        todo_id: Uuid,
        completed: bool,
    ) -> Result<Todo, AppError> {
        sqlx::query_as::<_, Todo>(
            r#"UPDATE todos SET completed = $1 WHERE id = $2
               RETURNING id, title, completed, user_id, created_at"#,
        )
        .bind(completed)
        .bind(todo_id)
        .fetch_optional(db)
        .await
        .context("Failed to update todo")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Todo not found")))
    }

    async fn force_subscription(
        db: &PgPool,
        email: &str,
        is_subscribed: bool,
    ) -> Result<User, AppError> {
        let subscription_ends =
            is_subscribed.then(|| Utc::now() + Duration::days(SUBSCRIPTION_PERIOD_DAYS));

        sqlx::query_as::<_, User>(
            r#"UPDATE users
               SET is_subscribed = $1, subscription_ends = $2, updated_at = NOW()
               WHERE email = $3
               RETURNING id, email, is_subscribed, subscription_ends, created_at, updated_at"#,
        )
        .bind(is_subscribed)
        .bind(subscription_ends)
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to update subscription")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use crate::modules::todos::service::TodoService;
    use crate::utils::pagination::ITEMS_PER_PAGE;

    async fn create_test_user(pool: &PgPool, id: &str, email: &str) {
        sqlx::query("INSERT INTO users (id, email, is_subscribed) VALUES ($1, $2, TRUE)")
            .bind(id)
            .bind(email)
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_overview_pages_todos_with_unfiltered_count(pool: PgPool) {
        create_test_user(&pool, "user_1", "a@b.com").await;
        for i in 0..12 {
            TodoService::create_todo(&pool, "user_1", &format!("Todo {i}"))
                .await
                .unwrap();
        }

        let (with_todos, total) = AdminService::overview(&pool, Some("a@b.com"), ITEMS_PER_PAGE, 0)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(with_todos.user.email, "a@b.com");
        assert_eq!(with_todos.todos.len(), 10);
        assert_eq!(total, 12);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_overview_unknown_email_is_none(pool: PgPool) {
        let result = AdminService::overview(&pool, Some("nobody@b.com"), ITEMS_PER_PAGE, 0)
            .await
            .unwrap();
        assert!(result.is_none());

        // Absent email behaves like an unknown one
        let result = AdminService::overview(&pool, None, ITEMS_PER_PAGE, 0)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_toggles_todo(pool: PgPool) {
        create_test_user(&pool, "user_1", "a@b.com").await;
        let todo = TodoService::create_todo(&pool, "user_1", "Buy milk")
            .await
            .unwrap();

        let response = AdminService::update(
            &pool,
            AdminUpdateDto {
                todo_id: Some(todo.id),
                todo_completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        match response {
            AdminUpdateResponse::Todo(updated) => assert!(updated.completed),
            AdminUpdateResponse::User(_) => panic!("expected a todo response"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_missing_todo_is_not_found(pool: PgPool) {
        let err = AdminService::update(
            &pool,
            AdminUpdateDto {
                todo_id: Some(Uuid::new_v4()),
                todo_completed: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_forces_subscription_on_and_off(pool: PgPool) {
        sqlx::query("INSERT INTO users (id, email) VALUES ('user_1', 'a@b.com')")
            .execute(&pool)
            .await
            .unwrap();

        let response = AdminService::update(
            &pool,
            AdminUpdateDto {
                email: Some("a@b.com".to_string()),
                is_subscribed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        match response {
            AdminUpdateResponse::User(user) => {
                assert!(user.is_subscribed);
                assert!(user.subscription_ends.is_some());
            }
            AdminUpdateResponse::Todo(_) => panic!("expected a user response"),
        }

        let response = AdminService::update(
            &pool,
            AdminUpdateDto {
                email: Some("a@b.com".to_string()),
                is_subscribed: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        match response {
            AdminUpdateResponse::User(user) => {
                assert!(!user.is_subscribed);
                assert!(user.subscription_ends.is_none());
            }
            AdminUpdateResponse::Todo(_) => panic!("expected a user response"),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_rejects_incomplete_field_combinations(pool: PgPool) {
        for dto in [
            AdminUpdateDto::default(),
            AdminUpdateDto {
                todo_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
            AdminUpdateDto {
                is_subscribed: Some(true),
                ..Default::default()
            },
            AdminUpdateDto {
                email: Some("a@b.com".to_string()),
                ..Default::default()
            },
        ] {
            let err = AdminService::update(&pool, dto).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_is_unconditional_past_the_gate(pool: PgPool) {
        create_test_user(&pool, "user_1", "a@b.com").await;
        let todo = TodoService::create_todo(&pool, "user_1", "Buy milk")
            .await
            .unwrap();

        AdminService::delete_todo(&pool, todo.id).await.unwrap();

        let err = AdminService::delete_todo(&pool, todo.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
