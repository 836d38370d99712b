//! API route configuration.
//!
//! Identity is resolved for every API route by
//! [`crate::api::middleware::identity::layer`]; individual handlers decide
//! whether an anonymous caller is acceptable.

use crate::api::handlers::{
    create_short_url_handler, delete_my_handler, list_all_handler, list_my_handler,
    list_public_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Read-only API routes.
///
/// # Endpoints
///
/// - `GET    /short-urls`        - Public links (paginated)
/// - `GET    /my/short-urls`     - Caller's links (identity required)
/// - `GET    /admin/short-urls`  - Every link (admin role required)
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/short-urls", get(list_public_handler))
        .route("/my/short-urls", get(list_my_handler))
        .route("/admin/short-urls", get(list_all_handler))
}

/// Mutating API routes, rate limited more strictly by the caller.
///
/// # Endpoints
///
/// - `POST   /short-urls`        - Create a short link (identity optional)
/// - `DELETE /my/short-urls`     - Bulk-delete caller's links (identity required)
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/short-urls", post(create_short_url_handler))
        .route("/my/short-urls", delete(delete_my_handler))
}
