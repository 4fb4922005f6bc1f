use axum::response::Response;
use serde_json::json;

use crate::{inertia::Inertia, routes::PageRoute};

/// health
///
/// Unauthenticated liveness probe for load balancers and monitoring.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}

/// render_page
///
/// Shared handler behind every page route. Pages take no parameters; the
/// component named by the route table is rendered with empty props (plus the
/// shared `auth.user` prop on gated routes).
pub async fn render_page(inertia: Inertia, route: &'static PageRoute) -> Response {
    tracing::debug!(route = route.name, component = route.component, "rendering page");
    inertia.render(route.component, json!({}))
}
