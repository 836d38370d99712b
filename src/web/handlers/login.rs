//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::api::middleware::identity::AUTH_COOKIE;
use crate::state::AppState;

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Token input form
/// - Error message after a rejected token
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub creator_name: Option<String>,
    pub error_message: Option<String>,
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
///
/// # Authentication
///
/// Users enter an API token issued with `admin token create`. It is stored in
/// the `auth_token` cookie for subsequent requests.
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate {
        creator_name: None,
        error_message: None,
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

fn cookie(value: &str, max_age: Option<u32>) -> Option<HeaderValue> {
    let mut cookie = format!("{AUTH_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(age) = max_age {
        cookie.push_str(&format!("; Max-Age={age}"));
    }
    HeaderValue::from_str(&cookie).ok()
}

/// Validates a token and stores it in the session cookie.
///
/// # Endpoint
///
/// `POST /login`
///
/// Redirects to `/my-urls` on success; re-renders the form on failure.
pub async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = form.token.trim();

    let rejected = |message: &str| {
        LoginTemplate {
            creator_name: None,
            error_message: Some(message.to_string()),
        }
        .into_response()
    };

    let creator = match state.auth_service.authenticate(token).await {
        Ok(creator) => creator,
        Err(_) => return rejected("Invalid or revoked token."),
    };

    let Some(value) = cookie(token, None) else {
        return rejected("Token contains characters not allowed in a cookie.");
    };

    tracing::info!(creator_id = creator.id, "Web login");

    let mut response = Redirect::to("/my-urls").into_response();
    response.headers_mut().insert(header::SET_COOKIE, value);
    response
}

/// Clears the session cookie.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler() -> Response {
    let mut response = Redirect::to("/").into_response();
    if let Some(value) = cookie("", Some(0)) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
