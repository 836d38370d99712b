//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::api::middleware::identity::CurrentCreator;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::key_generator::is_well_formed;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /s/{key}`
///
/// # Request Flow
///
/// 1. Reject keys that cannot have been generated
/// 2. Resolve through the access policy (existence, expiry, privacy)
/// 3. Count the click atomically
/// 4. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the key is unknown, expired, or private to
/// another creator. The three cases are indistinguishable to the client.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    requester: CurrentCreator,
) -> Result<impl IntoResponse, AppError> {
    if !is_well_formed(&key) {
        return Err(AppError::not_found("Short link not found", json!({})));
    }

    let original_url = state.link_service.resolve(&key, requester.id()).await?;

    Ok(Redirect::temporary(&original_url))
}
