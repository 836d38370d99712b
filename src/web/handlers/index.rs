//! Home page: public link listing and the creation form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_with::{DisplayFromStr, NoneAsEmptyString, serde_as};

use super::view::{LinkRow, Pager, rows};
use crate::api::dto::short_url::short_url;
use crate::api::middleware::identity::CurrentCreator;
use crate::application::services::CreateShortLink;
use crate::domain::page::PageRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Query parameters of the home page.
///
/// `created` and `error` carry the outcome of a form submission across the
/// post/redirect/get cycle.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,
    pub created: Option<String>,
    pub error: Option<String>,
}

/// Template for the home page.
///
/// Renders `templates/index.html` with:
/// - Link creation form
/// - Paginated public link list
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub creator_name: Option<String>,
    pub links: Vec<LinkRow>,
    pub pager: Pager,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /?page=1`
pub async fn index_handler(
    State(state): State<AppState>,
    creator: CurrentCreator,
    Query(params): Query<IndexParams>,
) -> Result<IndexTemplate, AppError> {
    let page = PageRequest::new(params.page.unwrap_or(1), state.default_page_size);
    let (links, pager) = rows(
        state.link_service.list_public(page).await?,
        &state.base_url,
    );

    let success_message = params
        .created
        .map(|key| format!("Short URL created: {}", short_url(&state.base_url, &key)));

    Ok(IndexTemplate {
        creator_name: creator.0.map(|c| c.name),
        links,
        pager,
        success_message,
        error_message: params.error,
    })
}

/// Creation form submitted from the home page.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct CreateShortUrlForm {
    pub original_url: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub expiration_in_days: Option<i64>,

    /// Checkbox value; present (`"on"`) when ticked.
    #[serde(default)]
    pub is_private: Option<String>,
}

fn home_with(key: &str, value: &str) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    Redirect::to(&format!("/?{query}"))
}

/// Handles the creation form.
///
/// # Endpoint
///
/// `POST /short-urls`
///
/// Always redirects back to `/`, with `?created=<key>` on success or
/// `?error=<message>` on failure.
pub async fn create_form_handler(
    State(state): State<AppState>,
    creator: CurrentCreator,
    Form(form): Form<CreateShortUrlForm>,
) -> impl IntoResponse {
    if form.original_url.trim().is_empty() {
        return home_with("error", "Original URL is required.");
    }

    let cmd = CreateShortLink {
        original_url: form.original_url.trim().to_string(),
        expiration_in_days: form.expiration_in_days,
        is_private: form.is_private.is_some(),
        owner_id: creator.id(),
    };

    match state.link_service.create(cmd).await {
        Ok(link) => home_with("created", &link.short_key),
        Err(e) => {
            tracing::debug!(error = %e, "Short URL form rejected");
            home_with("error", &format!("Failed to create short URL: {e}"))
        }
    }
}
