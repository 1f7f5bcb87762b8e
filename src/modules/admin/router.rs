use axum::{Router, routing::get};

use crate::modules::admin::controller::{admin_delete, admin_update, get_user_overview};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_user_overview).put(admin_update).delete(admin_delete),
    )
}
