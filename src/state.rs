//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    /// Scheme and host used to render `short_url` fields, without trailing slash.
    pub base_url: String,
    /// Page size used when a listing request does not name one.
    pub default_page_size: i64,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        auth_service: Arc<AuthService>,
        base_url: impl Into<String>,
        default_page_size: i64,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_page_size,
        }
    }
}
