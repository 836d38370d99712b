//! Handlers for short URL creation, listing and deletion.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::short_url::{
    CreateShortUrlRequest, DeleteShortUrlsRequest, DeleteShortUrlsResponse, ShortUrlResponse,
};
use crate::api::middleware::identity::{CurrentCreator, RequireAdmin, RequireCreator};
use crate::application::services::CreateShortLink;
use crate::domain::entities::ShortLink;
use crate::domain::page::Page;
use crate::error::AppError;
use crate::state::AppState;

fn to_response(state: &AppState, page: Page<ShortLink>) -> Json<Page<ShortUrlResponse>> {
    Json(page.map(|link| ShortUrlResponse::from_link(link, &state.base_url)))
}

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/short-urls`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "expiration_in_days": 7,   // optional, owned links only
///   "is_private": false        // optional, owned links only
/// }
/// ```
///
/// Anonymous requests always get a public link expiring after the
/// configured default.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 500 if no free short key could be allocated.
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    creator: CurrentCreator,
    Json(payload): Json<CreateShortUrlRequest>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create(CreateShortLink {
            original_url: payload.original_url,
            expiration_in_days: payload.expiration_in_days,
            is_private: payload.is_private,
            owner_id: creator.id(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse::from_link(link, &state.base_url)),
    ))
}

/// Lists public short URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/short-urls?page=1&page_size=10`
pub async fn list_public_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<ShortUrlResponse>>, AppError> {
    let page = params.to_page_request(state.default_page_size)?;
    let links = state.link_service.list_public(page).await?;

    Ok(to_response(&state, links))
}

/// Lists the caller's own short URLs, private ones included.
///
/// # Endpoint
///
/// `GET /api/my/short-urls?page=1&page_size=10`
pub async fn list_my_handler(
    State(state): State<AppState>,
    RequireCreator(creator): RequireCreator,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<ShortUrlResponse>>, AppError> {
    let page = params.to_page_request(state.default_page_size)?;
    let links = state.link_service.list_for_owner(creator.id, page).await?;

    Ok(to_response(&state, links))
}

/// Deletes the caller's short URLs by id.
///
/// # Endpoint
///
/// `DELETE /api/my/short-urls`
///
/// ```json
/// { "ids": [1, 2, 3] }
/// ```
///
/// Ids that do not exist or belong to someone else are skipped; the response
/// reports how many links were actually removed.
pub async fn delete_my_handler(
    State(state): State<AppState>,
    RequireCreator(creator): RequireCreator,
    Json(payload): Json<DeleteShortUrlsRequest>,
) -> Result<Json<DeleteShortUrlsResponse>, AppError> {
    payload.validate()?;

    let deleted = state
        .link_service
        .delete_for_owner(&payload.ids, creator.id)
        .await?;

    Ok(Json(DeleteShortUrlsResponse { deleted }))
}

/// Lists every short URL. Requires the admin role.
///
/// # Endpoint
///
/// `GET /api/admin/short-urls?page=1&page_size=10`
pub async fn list_all_handler(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<ShortUrlResponse>>, AppError> {
    let page = params.to_page_request(state.default_page_size)?;
    let links = state.link_service.list_all(page).await?;

    Ok(to_response(&state, links))
}
