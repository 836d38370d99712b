//! Login gate for owner-only browser pages.

use axum::{
    extract::Request,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::api::middleware::identity::CurrentCreator;

/// Redirects anonymous visitors to `/login`.
///
/// Runs inside [`crate::api::middleware::identity::lenient_layer`], which
/// resolves the `auth_token` cookie. A missing, invalid or revoked cookie all
/// leave the request anonymous.
///
/// # Differences from API identity
///
/// Unlike the API routes which return `401 Unauthorized`, this middleware
/// redirects to the login page for a better user experience in a browser
/// context.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::web::middleware::web_auth;
///
/// let protected = Router::new()
///     .route("/my-urls", get(my_urls_handler))
///     .route_layer(middleware::from_fn(web_auth::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Result<Response, Redirect> {
    let signed_in = req
        .extensions()
        .get::<CurrentCreator>()
        .is_some_and(|c| c.0.is_some());

    if signed_in {
        Ok(next.run(req).await)
    } else {
        Err(Redirect::to("/login"))
    }
}
