use axum::{Router, routing::get};

use crate::modules::subscription::controller::{activate_subscription, get_subscription};
use crate::state::AppState;

pub fn init_subscription_router() -> Router<AppState> {
    Router::new().route("/", get(get_subscription).post(activate_subscription))
}
