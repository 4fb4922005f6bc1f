use axum::{Router, extract::FromRef, http::HeaderName, routing::get};
use utoipa::{
    OpenApi,
    openapi::{
        content::ContentBuilder,
        path::{HttpMethod, OperationBuilder, PathItem},
        response::ResponseBuilder,
        schema::Ref,
    },
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod factory;
pub mod handlers;
pub mod inertia;
pub mod models;
pub mod repository;
pub mod seeders;

// Route tables and the page router built from them.
pub mod routes;
use routes::{Access, web};

// --- Public Re-exports ---

pub use config::{AppConfig, Env};
pub use error::Error;
pub use repository::{MemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Static part of the OpenAPI document. The page routes are appended from the
/// route tables by [`api_doc`], since they share one generic handler.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::health),
    components(schemas(models::Page, models::User)),
    tags((name = "community-portal", description = "Community portal pages"))
)]
struct ApiDoc;

/// api_doc
///
/// The full OpenAPI document, served at `/api-docs/openapi.json`.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    for route in routes::all_routes() {
        let page = ResponseBuilder::new()
            .description(format!("Renders the {} page", route.component))
            .content(
                "application/json",
                ContentBuilder::new()
                    .schema(Some(Ref::from_schema_name("Page")))
                    .build(),
            )
            .build();

        let mut operation = OperationBuilder::new()
            .operation_id(Some(route.name))
            .response("200", page);

        if route.access != Access::Public {
            operation = operation.response(
                "303",
                ResponseBuilder::new()
                    .description("Redirect when the session lacks the required capability")
                    .build(),
            );
        }

        doc.paths.paths.insert(
            route.path.to_string(),
            PathItem::new(HttpMethod::Get, operation.build()),
        );
    }

    doc
}

/// AppState
///
/// The single, immutable container shared by every request: the persistence
/// layer and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: `users` table access (Postgres or in-memory).
    pub repo: RepositoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors such as `AuthUser` and `Inertia` pull only the pieces they need.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies global middleware and registers
/// the application state. Built once at startup.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_doc()))
        .route("/health", get(handlers::health))
        // Page routes; gated entries carry their own `auth` / `verified` layers.
        .merge(web::web_routes(&state))
        .with_state(state);

    // Observability layers, outermost first: request id, tracing span, id propagation.
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// init_tracing
///
/// Installs the global subscriber. `RUST_LOG` wins; otherwise a development
/// default. Local runs get pretty output, production gets JSON for log aggregators.
pub fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "community_portal=debug,seed=debug,tower_http=info".into());

    match config.env {
        Env::Local => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init(),
        Env::Production => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// trace_span_logger
///
/// Builds the per-request span, tagged with the `x-request-id` set above so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
