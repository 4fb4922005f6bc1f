use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use crate::{auth::AuthUser, config::AppConfig, models::Page};

/// Set by the client-side router on its XHR visits, and echoed on JSON responses.
pub const X_INERTIA: &str = "x-inertia";
/// Asset version the client was built against.
pub const X_INERTIA_VERSION: &str = "x-inertia-version";
/// Target of a forced full-page reload.
pub const X_INERTIA_LOCATION: &str = "x-inertia-location";

/// Inertia
///
/// Request-side view of the page-render bridge. Extract it in a handler and call
/// [`Inertia::render`] to answer with either the JSON page object (client-side
/// visits) or the HTML shell that boots the front-end (first load).
#[derive(Debug, Clone)]
pub struct Inertia {
    is_inertia: bool,
    method: Method,
    client_version: Option<String>,
    url: String,
    version: String,
    app_name: String,
    user: Option<AuthUser>,
}

impl<S> FromRequestParts<S> for Inertia
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let is_inertia = parts
            .headers
            .get(X_INERTIA)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        let client_version = parts
            .headers
            .get(X_INERTIA_VERSION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_owned())
            .unwrap_or_else(|| parts.uri.path().to_owned());

        Ok(Self {
            is_inertia,
            method: parts.method.clone(),
            client_version,
            url,
            version: config.asset_version,
            app_name: config.app_name,
            user: parts.extensions.get::<AuthUser>().cloned(),
        })
    }
}

impl Inertia {
    /// Builds the page object for `component`. The resolved user, if any, is
    /// shared as the `auth.user` prop.
    pub fn page(&self, component: &str, props: Value) -> Page {
        let mut props = match props {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        if let Some(auth) = &self.user {
            props.insert("auth".to_string(), json!({ "user": auth.user }));
        }

        Page {
            component: component.to_string(),
            props: Value::Object(props),
            url: self.url.clone(),
            version: self.version.clone(),
        }
    }

    pub fn render(self, component: &str, props: Value) -> Response {
        if self.is_stale() {
            tracing::debug!(url = %self.url, "asset version mismatch, forcing reload");
            let mut headers = HeaderMap::new();
            if let Ok(location) = HeaderValue::from_str(&self.url) {
                headers.insert(X_INERTIA_LOCATION, location);
            }
            return (StatusCode::CONFLICT, headers).into_response();
        }

        let page = self.page(component, props);

        if self.is_inertia {
            let mut headers = HeaderMap::new();
            headers.insert(X_INERTIA, HeaderValue::from_static("true"));
            headers.insert(header::VARY, HeaderValue::from_static("X-Inertia"));
            return (headers, Json(page)).into_response();
        }

        match serde_json::to_string(&page) {
            Ok(data) => Html(shell(&self.app_name, &data)).into_response(),
            Err(e) => {
                tracing::error!("failed to serialize page {}: {:?}", page.component, e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }

    // Only client-side GET visits carry a version worth checking.
    fn is_stale(&self) -> bool {
        self.is_inertia
            && self.method == Method::GET
            && self
                .client_version
                .as_deref()
                .is_some_and(|client| client != self.version)
    }
}

/// The first-load document. The page object rides in the `data-page` attribute.
pub fn shell(title: &str, page_json: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<script type=\"module\" src=\"/build/app.js\"></script>\n</head>\n\
         <body>\n<div id=\"app\" data-page=\"{}\"></div>\n</body>\n</html>\n",
        escape_html(title),
        escape_html(page_json)
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
