use axum::{Router, response::Redirect, routing::get};

use super::{Access, PageRoute, page_routes};
use crate::AppState;

pub const SETTINGS_ROUTES: &[PageRoute] = &[
    PageRoute {
        name: "profile.edit",
        path: "/settings/profile",
        component: "settings/Profile",
        access: Access::Authenticated,
    },
    PageRoute {
        name: "password.edit",
        path: "/settings/password",
        component: "settings/Password",
        access: Access::Authenticated,
    },
    PageRoute {
        name: "appearance",
        path: "/settings/appearance",
        component: "settings/Appearance",
        access: Access::Authenticated,
    },
];

/// settings_routes
///
/// `/settings` itself has no page and forwards to the profile tab.
pub fn settings_routes(state: &AppState) -> Router<AppState> {
    page_routes(SETTINGS_ROUTES, state).route(
        "/settings",
        get(|| async { Redirect::to("/settings/profile") }),
    )
}
