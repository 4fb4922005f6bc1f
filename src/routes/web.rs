use axum::Router;

use super::{Access, PageRoute, auth, page_routes, settings};
use crate::AppState;

/// The site's own pages. Only the dashboard is gated.
pub const WEB_ROUTES: &[PageRoute] = &[
    PageRoute {
        name: "home",
        path: "/",
        component: "Welcome",
        access: Access::Public,
    },
    PageRoute {
        name: "dashboard",
        path: "/dashboard",
        component: "Dashboard",
        access: Access::Verified,
    },
    PageRoute {
        name: "team",
        path: "/team",
        component: "Team",
        access: Access::Public,
    },
    PageRoute {
        name: "games",
        path: "/games",
        component: "Games",
        access: Access::Public,
    },
    PageRoute {
        name: "images",
        path: "/images",
        component: "Images",
        access: Access::Public,
    },
    PageRoute {
        name: "posts",
        path: "/posts",
        component: "Posts",
        access: Access::Public,
    },
    PageRoute {
        name: "agenda",
        path: "/agenda",
        component: "Agenda",
        access: Access::Public,
    },
];

/// web_routes
///
/// The complete page router: this file's table plus the settings and auth route files.
pub fn web_routes(state: &AppState) -> Router<AppState> {
    page_routes(WEB_ROUTES, state)
        .merge(settings::settings_routes(state))
        .merge(auth::auth_routes(state))
}
