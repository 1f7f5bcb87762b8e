use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::edge_gate::edge_gate;
use crate::middleware::role::require_admin;
use crate::modules::admin::router::init_admin_router;
use crate::modules::subscription::router::init_subscription_router;
use crate::modules::todos::router::init_todos_router;
use crate::modules::webhook::router::init_webhook_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/todos", init_todos_router())
        .nest("/subscription", init_subscription_router())
        .nest(
            "/admin/todos",
            init_admin_router()
                .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
        )
        .nest("/webhook", init_webhook_router())
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn_with_state(state, edge_gate))
        .layer(middleware::from_fn(logging_middleware))
}
