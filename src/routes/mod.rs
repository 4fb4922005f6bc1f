//! Router Module Index
//!
//! Each submodule is one route file: a static, ordered table of page routes.
//! `web` is the entry point and pulls in `settings` and `auth` the way a route
//! file includes its neighbours.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{MethodRouter, get},
};

use crate::{
    AppState,
    auth::{require_auth, require_verified},
    handlers,
    inertia::Inertia,
};

/// Public landing and content pages, plus the gated dashboard.
pub mod web;

/// Account settings pages. Require an authenticated session.
pub mod settings;

/// Login, registration and email verification pages.
pub mod auth;

/// Access
///
/// The capability set a request must carry before the page handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No requirement.
    Public,
    /// `auth`: a resolved user.
    Authenticated,
    /// `auth` then `verified`: a resolved user with a confirmed email.
    Verified,
}

/// PageRoute
///
/// One entry of a route table: `GET path` renders `component`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRoute {
    pub name: &'static str,
    pub path: &'static str,
    pub component: &'static str,
    pub access: Access,
}

/// Every route table, in registration order.
pub const ROUTE_TABLES: [&[PageRoute]; 3] =
    [web::WEB_ROUTES, settings::SETTINGS_ROUTES, auth::AUTH_ROUTES];

/// Iterates the page routes of every table.
pub fn all_routes() -> impl Iterator<Item = &'static PageRoute> {
    ROUTE_TABLES.into_iter().flatten()
}

/// route_path
///
/// Resolves a route name to its path.
pub fn route_path(name: &str) -> Option<&'static str> {
    all_routes().find(|route| route.name == name).map(|route| route.path)
}

/// page_routes
///
/// Registers a GET handler for every entry of `table`, wrapping gated entries in
/// their capability middleware. Layers added last run first, so `auth` is
/// attached after `verified`.
pub fn page_routes(table: &'static [PageRoute], state: &AppState) -> Router<AppState> {
    table.iter().fold(Router::new(), |router, route| {
        let handler: MethodRouter<AppState> =
            get(move |inertia: Inertia| handlers::render_page(inertia, route));
        let handler = match route.access {
            Access::Public => handler,
            Access::Authenticated => {
                handler.route_layer(from_fn_with_state(state.clone(), require_auth))
            }
            Access::Verified => handler
                .route_layer(from_fn(require_verified))
                .route_layer(from_fn_with_state(state.clone(), require_auth)),
        };
        router.route(route.path, handler)
    })
}
