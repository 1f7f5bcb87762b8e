use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admin::model::{
    AdminDeleteDto, AdminOverviewResponse, AdminUpdateDto, AdminUpdateResponse, UserWithTodos,
};
use crate::modules::subscription::model::{
    ActivateSubscriptionResponse, SubscriptionStatusResponse,
};
use crate::modules::todos::model::{
    CreateTodoDto, MessageResponse, PaginatedTodosResponse, Todo, UpdateTodoDto,
};
use crate::modules::users::model::User;
use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::todos::controller::get_todos,
        crate::modules::todos::controller::create_todo,
        crate::modules::todos::controller::update_todo,
        crate::modules::todos::controller::delete_todo,
        crate::modules::subscription::controller::activate_subscription,
        crate::modules::subscription::controller::get_subscription,
        crate::modules::admin::controller::get_user_overview,
        crate::modules::admin::controller::admin_update,
        crate::modules::admin::controller::admin_delete,
        crate::modules::webhook::controller::register_user,
    ),
    components(
        schemas(
            Todo,
            CreateTodoDto,
            UpdateTodoDto,
            PaginatedTodosResponse,
            MessageResponse,
            User,
            ActivateSubscriptionResponse,
            SubscriptionStatusResponse,
            UserWithTodos,
            AdminOverviewResponse,
            AdminUpdateDto,
            AdminUpdateResponse,
            AdminDeleteDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Todos", description = "Owner-scoped todo management"),
        (name = "Subscription", description = "Subscription activation and status"),
        (name = "Admin", description = "Administrative access to any user's todos and subscription"),
        (name = "Webhook", description = "Signed identity-provider provisioning events")
    ),
    info(
        title = "Taskgate API",
        version = "0.1.0",
        description = "Subscription-gated todo backend built with Rust, Axum, and PostgreSQL. Identity is external; users are provisioned through a signed webhook.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
