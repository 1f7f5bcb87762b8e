use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::todos::controller::{create_todo, delete_todo, get_todos, update_todo};
use crate::state::AppState;

pub fn init_todos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_todos).post(create_todo))
        .route("/{id}", put(update_todo).delete(delete_todo))
}
