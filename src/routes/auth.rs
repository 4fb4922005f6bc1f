use axum::Router;

use super::{Access, PageRoute, page_routes};
use crate::AppState;

/// Form pages of the sign-in flow. Submitting them is handled by the identity
/// provider that issues the bearer tokens, not by this service.
pub const AUTH_ROUTES: &[PageRoute] = &[
    PageRoute {
        name: "login",
        path: "/login",
        component: "auth/Login",
        access: Access::Public,
    },
    PageRoute {
        name: "register",
        path: "/register",
        component: "auth/Register",
        access: Access::Public,
    },
    PageRoute {
        name: "password.request",
        path: "/forgot-password",
        component: "auth/ForgotPassword",
        access: Access::Public,
    },
    // Must not require `verified`, it is where unverified users are sent.
    PageRoute {
        name: "verification.notice",
        path: "/verify-email",
        component: "auth/VerifyEmail",
        access: Access::Authenticated,
    },
];

pub fn auth_routes(state: &AppState) -> Router<AppState> {
    page_routes(AUTH_ROUTES, state)
}
