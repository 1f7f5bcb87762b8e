use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Per-request access log. A generated request id ties the incoming and
/// completed lines together; the completed line carries status and
/// latency at a level picked by response class. Redirects from the edge
/// gate log as plain completions.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    // Prefer the route template over the raw path so ids don't explode
    // log cardinality
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => req.uri().path().to_string(),
    };

    tracing::info!(%request_id, %method, %path, "Incoming request");

    let start = Instant::now();
    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let status = response.status().as_u16();
    if status >= 500 {
        tracing::error!(%request_id, %method, %path, status, latency_ms, "Server error");
    } else if status >= 400 {
        tracing::warn!(%request_id, %method, %path, status, latency_ms, "Client error");
    } else {
        tracing::info!(%request_id, %method, %path, status, latency_ms, "Request completed");
    }

    response
}
