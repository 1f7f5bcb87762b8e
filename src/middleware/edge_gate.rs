//! Redirect-based access control for page routes.
//!
//! Runs ahead of routing on every request. The JSON API keeps its own
//! 401/403 contract, so API and docs prefixes pass through untouched;
//! page paths get the public/authenticated/admin redirect rules.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::identity::Role;
use crate::state::AppState;
use crate::utils::jwt::verify_session_token;

/// Prefixes owned by route handlers; the gate never redirects these.
const API_PREFIXES: &[&str] = &[
    "/todos",
    "/subscription",
    "/admin/todos",
    "/webhook",
    "/swagger-ui",
    "/scalar",
    "/api-docs",
];

fn is_api_path(path: &str) -> bool {
    API_PREFIXES
        .iter()
        .any(|prefix| path == *prefix || path.starts_with(&format!("{prefix}/")))
}

fn is_public_page(path: &str) -> bool {
    path == "/" || path.starts_with("/sign-in") || path.starts_with("/sign-up")
}

fn dashboard_for(role: Role) -> &'static str {
    if role.is_admin() {
        "/admin/dashboard"
    } else {
        "/dashboard"
    }
}

fn session_token(req: &Request) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    // Browser requests carry the provider session as a cookie
    req.headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())?
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix("__session="))
        .map(str::to_string)
}

pub async fn edge_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    if is_api_path(&path) {
        return next.run(req).await;
    }

    let claims = session_token(&req)
        .and_then(|token| verify_session_token(&token, &state.identity_config).ok());

    let Some(claims) = claims else {
        if is_public_page(&path) {
            return next.run(req).await;
        }
        return Redirect::to("/sign-in").into_response();
    };

    // The error page must stay reachable when role resolution is down
    if path == "/error" {
        return next.run(req).await;
    }

    let role = match state.identity.fetch_role(&claims.sub).await {
        Ok(role) => role,
        Err(err) => {
            tracing::error!(error = ?err.error, "Failed to resolve role claim");
            return Redirect::to("/error").into_response();
        }
    };

    if role.is_admin() && path == "/dashboard" {
        return Redirect::to("/admin/dashboard").into_response();
    }

    if !role.is_admin() && path.starts_with("/admin") {
        return Redirect::to("/dashboard").into_response();
    }

    if is_public_page(&path) {
        return Redirect::to(dashboard_for(role)).into_response();
    }

    next.run(req).await
}
