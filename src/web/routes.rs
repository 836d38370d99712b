//! Browser page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_form_handler, index_handler, login_handler, login_submit_handler, logout_handler,
    my_urls_handler,
};
use crate::web::middleware::web_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Pages open to everyone.
///
/// # Endpoints
///
/// - `GET  /`            - Public links and the creation form
/// - `POST /short-urls`  - Creation form target
/// - `GET  /login`       - Token login form
/// - `POST /login`       - Stores the token cookie
/// - `GET  /logout`      - Clears the token cookie
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/short-urls", post(create_form_handler))
        .route("/login", get(login_handler).post(login_submit_handler))
        .route("/logout", get(logout_handler))
}

/// Pages requiring a signed-in creator.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /my-urls` - Caller's links with delete buttons
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/my-urls", get(my_urls_handler))
        .route_layer(middleware::from_fn(web_auth::layer))
}
