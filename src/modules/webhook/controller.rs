use axum::{extract::State, http::HeaderMap, http::StatusCode};
use svix::webhooks::Webhook;
use tracing::instrument;

use crate::modules::webhook::model::ProvisioningEvent;
use crate::modules::users::service::UserService;
use crate::state::AppState;

const SVIX_HEADERS: [&str; 3] = ["svix-id", "svix-timestamp", "svix-signature"];

/// Signed provisioning intake. Verification is delegated to svix; on a
/// verified `user.created` event the user row is created with the
/// subscription off. Every other event type is acknowledged untouched.
#[utoipa::path(
    post,
    path = "/webhook/register",
    request_body = String,
    responses(
        (status = 200, description = "Event verified; user created or event ignored", body = String),
        (status = 400, description = "Missing headers, failed verification, or malformed payload", body = String),
        (status = 500, description = "User row could not be created", body = String)
    ),
    tag = "Webhook"
)]
#[instrument(skip(state, body))]
pub async fn register_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    if SVIX_HEADERS.iter().any(|name| !headers.contains_key(*name)) {
        return (StatusCode::BAD_REQUEST, "error occured - no svix headers");
    }

    let webhook = match Webhook::new(&state.webhook_config.secret) {
        Ok(webhook) => webhook,
        Err(err) => {
            tracing::error!(error = %err, "Webhook secret is not usable");
            return (StatusCode::INTERNAL_SERVER_ERROR, "error occured");
        }
    };

    if let Err(err) = webhook.verify(body.as_bytes(), &headers) {
        tracing::warn!(error = %err, "Webhook signature verification failed");
        return (StatusCode::BAD_REQUEST, "error occured");
    }

    let event: ProvisioningEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "Malformed webhook payload");
            return (StatusCode::BAD_REQUEST, "error occured");
        }
    };

    if event.event_type == "user.created" {
        let Some(email) = event.data.primary_email() else {
            return (StatusCode::BAD_REQUEST, "error occured - no primary email");
        };

        if let Err(err) = UserService::create_user(&state.db, &event.data.id, email).await {
            tracing::error!(error = ?err.error, "Error creating user from webhook");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error creating user");
        }
    }

    (StatusCode::OK, "Webhook received successfully")
}
