//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /s/{key}`     - Short link redirect (identity optional)
//! - `GET  /health`      - Health check (public)
//! - `/api/*`            - JSON API (Bearer token or `auth_token` cookie)
//! - `/`, `/my-urls`, `/login` - Browser pages
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Identity** - strict on `/api`, lenient on browser pages and redirects
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{identity, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Page routes: the redirect plus the browser UI.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/s/{key}", get(redirect_handler))
        .merge(web::routes::public_routes())
        .merge(web::routes::protected_routes())
}

/// Wires identity resolution, health and tracing around the route groups.
fn assemble(state: AppState, api_router: Router<AppState>, pages: Router<AppState>) -> Router {
    let api_router =
        api_router.layer(middleware::from_fn_with_state(state.clone(), identity::layer));

    let pages = pages.layer(middleware::from_fn_with_state(
        state.clone(),
        identity::lenient_layer,
    ));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(pages)
        .with_state(state)
        .layer(tracing::layer())
}

/// All routes without rate limiting.
///
/// Rate limits are keyed on the client IP, which in-process test clients
/// do not provide.
pub fn routes(state: AppState) -> Router {
    let api_router = api::routes::read_routes().merge(api::routes::write_routes());

    assemble(state, api_router, page_routes())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let (api_router, pages) = if behind_proxy {
        (
            api::routes::read_routes()
                .layer(rate_limit::proxied_layer())
                .merge(api::routes::write_routes().layer(rate_limit::proxied_secure_layer())),
            page_routes().layer(rate_limit::proxied_layer()),
        )
    } else {
        (
            api::routes::read_routes()
                .layer(rate_limit::layer())
                .merge(api::routes::write_routes().layer(rate_limit::secure_layer())),
            page_routes().layer(rate_limit::layer()),
        )
    };

    NormalizePathLayer::trim_trailing_slash().layer(assemble(state, api_router, pages))
}
