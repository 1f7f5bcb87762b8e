use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::todos::model::{
    CreateTodoDto, MessageResponse, PaginatedTodosResponse, Todo, TodoListQuery, UpdateTodoDto,
};
use crate::modules::todos::service::TodoService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{ITEMS_PER_PAGE, total_pages};
use crate::validator::ValidatedJson;

/// List the caller's todos, paginated and optionally filtered by title
#[utoipa::path(
    get,
    path = "/todos",
    params(TodoListQuery),
    responses(
        (status = 200, description = "One page of todos, newest first", body = PaginatedTodosResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument]
pub async fn get_todos(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<TodoListQuery>,
) -> Result<Json<PaginatedTodosResponse>, AppError> {
    let (todos, total) = TodoService::list_todos(
        &state.db,
        auth_user.user_id(),
        ITEMS_PER_PAGE,
        query.offset(),
        query.search.as_deref(),
    )
    .await?;

    Ok(Json(PaginatedTodosResponse {
        todos,
        current_page: query.page(),
        total_pages: total_pages(total),
    }))
}

/// Create a todo, subject to the free-tier quota
#[utoipa::path(
    post,
    path = "/todos",
    request_body = CreateTodoDto,
    responses(
        (status = 201, description = "Todo created", body = Todo),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Free-tier quota exhausted", body = ErrorResponse),
        (status = 404, description = "User record not provisioned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument]
pub async fn create_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTodoDto>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = TodoService::create_todo(&state.db, auth_user.user_id(), &dto.title).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Set the completion flag of an owned todo
#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    request_body = UpdateTodoDto,
    responses(
        (status = 200, description = "Updated todo", body = Todo),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Todo owned by another user", body = ErrorResponse),
        (status = 404, description = "No such todo", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument]
pub async fn update_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateTodoDto>,
) -> Result<Json<Todo>, AppError> {
    let todo =
        TodoService::update_todo(&state.db, id, auth_user.user_id(), dto.completed).await?;
    Ok(Json(todo))
}

/// Delete an owned todo
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(("id" = Uuid, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Todo owned by another user", body = ErrorResponse),
        (status = 404, description = "No such todo", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Todos"
)]
#[instrument]
pub async fn delete_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    TodoService::delete_todo(&state.db, id, auth_user.user_id()).await?;
    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}
