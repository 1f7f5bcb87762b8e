use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{ITEMS_PER_PAGE, deserialize_optional_i64};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoDto {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTodoDto {
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct TodoListQuery {
    /// 1-based page number, defaults to 1
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Case-insensitive substring filter on title
    pub search: Option<String>,
}

impl TodoListQuery {
    pub fn page(&self) -> i64 {
        crate::utils::pagination::page_number(self.page)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * ITEMS_PER_PAGE
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTodosResponse {
    pub todos: Vec<Todo>,
    pub current_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
