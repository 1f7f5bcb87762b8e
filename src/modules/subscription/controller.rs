use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::subscription::model::{
    ActivateSubscriptionResponse, SubscriptionStatusResponse,
};
use crate::modules::subscription::service::SubscriptionService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};

/// Activate (or re-activate) the caller's subscription
#[utoipa::path(
    post,
    path = "/subscription",
    responses(
        (status = 200, description = "Subscription active", body = ActivateSubscriptionResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User record not provisioned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subscription"
)]
#[instrument]
pub async fn activate_subscription(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ActivateSubscriptionResponse>, AppError> {
    let user = SubscriptionService::activate(&state.db, auth_user.user_id()).await?;

    Ok(Json(ActivateSubscriptionResponse {
        message: "Subscription successful".to_string(),
        subscription_ends: user.subscription_ends,
    }))
}

/// Current subscription state; expired records are corrected on read
#[utoipa::path(
    get,
    path = "/subscription",
    responses(
        (status = 200, description = "Subscription state", body = SubscriptionStatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User record not provisioned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Subscription"
)]
#[instrument]
pub async fn get_subscription(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<SubscriptionStatusResponse>, AppError> {
    let user = SubscriptionService::status(&state.db, auth_user.user_id()).await?;

    Ok(Json(SubscriptionStatusResponse {
        is_subscribed: user.is_subscribed,
        subscription_ends: user.subscription_ends,
    }))
}
