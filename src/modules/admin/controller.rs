use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::admin::model::{
    AdminDeleteDto, AdminOverviewQuery, AdminOverviewResponse, AdminUpdateDto,
    AdminUpdateResponse,
};
use crate::modules::admin::service::AdminService;
use crate::modules::todos::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::pagination::{ITEMS_PER_PAGE, total_pages};

/// A user by exact email with one page of their todos
#[utoipa::path(
    get,
    path = "/admin/todos",
    params(AdminOverviewQuery),
    responses(
        (status = 200, description = "User with one page of todos; null user when the email matches nobody", body = AdminOverviewResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller lacks the admin role claim", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument]
pub async fn get_user_overview(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<AdminOverviewQuery>,
) -> Result<Json<AdminOverviewResponse>, AppError> {
    let overview = AdminService::overview(
        &state.db,
        query.email.as_deref(),
        ITEMS_PER_PAGE,
        query.offset(),
    )
    .await?;

    let response = match overview {
        Some((user, total)) => AdminOverviewResponse {
            user: Some(user),
            total_pages: total_pages(total),
            current_page: query.page(),
        },
        None => AdminOverviewResponse {
            user: None,
            total_pages: 0,
            current_page: 1,
        },
    };

    Ok(Json(response))
}

/// Toggle any todo, or force a user's subscription state
#[utoipa::path(
    put,
    path = "/admin/todos",
    request_body = AdminUpdateDto,
    responses(
        (status = 200, description = "Updated todo or user", body = AdminUpdateResponse),
        (status = 400, description = "Unrecognized field combination", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller lacks the admin role claim", body = ErrorResponse),
        (status = 404, description = "Target record absent", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument]
pub async fn admin_update(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(dto): Json<AdminUpdateDto>,
) -> Result<Json<AdminUpdateResponse>, AppError> {
    let response = AdminService::update(&state.db, dto).await?;
    Ok(Json(response))
}

/// Delete any todo by id
#[utoipa::path(
    delete,
    path = "/admin/todos",
    request_body = AdminDeleteDto,
    responses(
        (status = 200, description = "Todo deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller lacks the admin role claim", body = ErrorResponse),
        (status = 404, description = "No such todo", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument]
pub async fn admin_delete(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Json(dto): Json<AdminDeleteDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::delete_todo(&state.db, dto.todo_id).await?;
    Ok(Json(MessageResponse {
        message: "Todo deleted successfully".to_string(),
    }))
}
