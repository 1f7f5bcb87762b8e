use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::modules::todos::model::Todo;
use crate::modules::users::model::User;
use crate::utils::pagination::deserialize_optional_i64;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminOverviewQuery {
    /// Exact-match email of the user to inspect
    pub email: Option<String>,
    /// 1-based page number over the user's todos, defaults to 1
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl AdminOverviewQuery {
    pub fn page(&self) -> i64 {
        crate::utils::pagination::page_number(self.page)
    }

    pub fn offset(&self) -> i64 {
        crate::utils::pagination::page_offset(self.page)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserWithTodos {
    #[serde(flatten)]
    pub user: User,
    pub todos: Vec<Todo>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverviewResponse {
    pub user: Option<UserWithTodos>,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Multiplexed update body: either a todo toggle or a subscription force.
/// Which optional fields are present selects the operation.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateDto {
    pub email: Option<String>,
    pub todo_id: Option<Uuid>,
    pub todo_completed: Option<bool>,
    pub is_subscribed: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AdminUpdateResponse {
    Todo(Todo),
    User(User),
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDeleteDto {
    pub todo_id: Uuid,
}
