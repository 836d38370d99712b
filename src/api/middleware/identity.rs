//! Request identity resolution.
//!
//! Identity is optional on most routes: a request without credentials is
//! served as anonymous. Credentials come from either source:
//!
//! ```text
//! Authorization: Bearer <token>
//! Cookie: auth_token=<token>
//! ```
//!
//! [`layer`] rejects unknown or revoked tokens with `401`. [`lenient_layer`]
//! serves such requests as anonymous instead, which suits browser pages where
//! a stale cookie should not lock the user out.
//!
//! Handlers read the result through the [`CurrentCreator`], [`RequireCreator`]
//! and [`RequireAdmin`] extractors.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use std::convert::Infallible;

use crate::{domain::entities::Creator, error::AppError, state::AppState};

/// Name of the cookie carrying the API token for browser sessions.
pub const AUTH_COOKIE: &str = "auth_token";

/// The creator behind the current request, if any.
#[derive(Debug, Clone, Default)]
pub struct CurrentCreator(pub Option<Creator>);

impl CurrentCreator {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|c| c.id)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentCreator {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentCreator>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Extractor for routes that need an authenticated creator.
///
/// Rejects anonymous requests with `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct RequireCreator(pub Creator);

impl<S: Send + Sync> FromRequestParts<S> for RequireCreator {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentCreator(creator) = CurrentCreator::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        creator.map(RequireCreator).ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authentication required"}),
            )
        })
    }
}

/// Extractor for admin-only routes.
///
/// Rejects anonymous requests with `401` and non-admins with `403`.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Creator);

impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireCreator(creator) = RequireCreator::from_request_parts(parts, state).await?;

        if !creator.is_admin() {
            return Err(AppError::forbidden(
                "Forbidden",
                json!({"reason": "Administrator role required"}),
            ));
        }

        Ok(RequireAdmin(creator))
    }
}

/// Reads the `auth_token` cookie from request headers.
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Extracts the raw token, preferring the `Authorization` header.
async fn credentials(parts: &mut Parts) -> Result<Option<String>, AppError> {
    if parts.headers.contains_key(header::AUTHORIZATION) {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;
        return Ok(Some(token));
    }

    Ok(cookie_token(&parts.headers))
}

async fn resolve(st: &AppState, parts: &mut Parts) -> Result<Option<Creator>, AppError> {
    match credentials(parts).await? {
        Some(token) => Ok(Some(st.auth_service.authenticate(&token).await?)),
        None => Ok(None),
    }
}

/// Resolves the request identity, rejecting invalid credentials.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - `Authorization` header is present but not a Bearer token
/// - Token is not found or revoked
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::identity;
///
/// let api = Router::new()
///     .route("/my/short-urls", get(list_my_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), identity::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let creator = resolve(&st, &mut parts).await?;
    parts.extensions.insert(CurrentCreator(creator));

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Resolves the request identity, treating invalid credentials as anonymous.
pub async fn lenient_layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let creator = match resolve(&st, &mut parts).await {
        Ok(creator) => creator,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid credentials");
            None
        }
    };
    parts.extensions.insert(CurrentCreator(creator));

    next.run(Request::from_parts(parts, body)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_token_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=abc123; lang=en"),
        );

        assert_eq!(cookie_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cookie_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert!(cookie_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("auth_token="));
        assert!(cookie_token(&headers).is_none());
    }
}
