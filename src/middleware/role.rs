//! Admin gate for the `/admin` API surface.
//!
//! The role claim is fetched from the identity provider on every request;
//! there is no session or role caching, so role changes take effect
//! immediately at the cost of one extra lookup per admin request.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

async fn check_admin(
    state: &AppState,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, state).await?;

    let role = state.identity.fetch_role(auth_user.user_id()).await?;
    if !role.is_admin() {
        // Authenticated but lacking the role claim is 403, never 401
        return Err(AppError::forbidden(
            "Access denied. Administrator privileges required.".to_string(),
        ));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Layer for admin-only routes.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, middleware};
/// use crate::middleware::role::require_admin;
///
/// let admin_routes = Router::new()
///     .route("/admin/todos", get(overview_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match check_admin(&state, req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
