use axum::{Router, routing::post};

use crate::modules::webhook::controller::register_user;
use crate::state::AppState;

pub fn init_webhook_router() -> Router<AppState> {
    Router::new().route("/register", post(register_user))
}
