//! Owner page listing the caller's links.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};

use super::view::{LinkRow, Pager, rows};
use crate::api::dto::pagination::PaginationParams;
use crate::api::middleware::identity::RequireCreator;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the owner's link list.
///
/// Delete buttons call `DELETE /api/my/short-urls` from the page script; the
/// `auth_token` cookie authenticates the call.
#[derive(Template, WebTemplate)]
#[template(path = "my_urls.html")]
pub struct MyUrlsTemplate {
    pub creator_name: Option<String>,
    pub links: Vec<LinkRow>,
    pub pager: Pager,
}

/// Renders the caller's links, private ones included.
///
/// # Endpoint
///
/// `GET /my-urls?page=1`
///
/// Anonymous visitors are redirected to `/login` by
/// [`crate::web::middleware::web_auth::layer`].
pub async fn my_urls_handler(
    State(state): State<AppState>,
    RequireCreator(creator): RequireCreator,
    Query(params): Query<PaginationParams>,
) -> Result<MyUrlsTemplate, AppError> {
    let page = params.to_page_request(state.default_page_size)?;
    let (links, pager) = rows(
        state.link_service.list_for_owner(creator.id, page).await?,
        &state.base_url,
    );

    Ok(MyUrlsTemplate {
        creator_name: Some(creator.name),
        links,
        pager,
    })
}
