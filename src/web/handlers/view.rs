//! View models shared by the page templates.

use crate::api::dto::short_url::short_url;
use crate::domain::entities::ShortLink;
use crate::domain::page::Page;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One table row of a link listing.
pub struct LinkRow {
    pub id: i64,
    pub short_key: String,
    pub short_url: String,
    pub original_url: String,
    pub created_by: String,
    pub is_private: bool,
    pub created_at: String,
    pub expires_at: String,
    pub click_count: i64,
}

impl LinkRow {
    pub fn new(link: ShortLink, base_url: &str) -> Self {
        Self {
            id: link.id,
            short_url: short_url(base_url, &link.short_key),
            created_by: link
                .created_by
                .map(|c| c.name)
                .unwrap_or_else(|| "Guest".to_string()),
            is_private: link.is_private,
            created_at: link.created_at.format(DATE_FORMAT).to_string(),
            expires_at: link
                .expires_at
                .map(|t| t.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "Never".to_string()),
            click_count: link.click_count,
            short_key: link.short_key,
            original_url: link.original_url,
        }
    }
}

/// Pager state for templates.
pub struct Pager {
    pub page_no: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub prev: Option<i64>,
    pub next: Option<i64>,
}

impl Pager {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            page_no: page.page_no,
            total_pages: page.total_pages.max(1),
            total_count: page.total_count,
            prev: page.has_previous.then(|| page.page_no - 1),
            next: page.has_next.then(|| page.page_no + 1),
        }
    }
}

/// Splits a page of links into template rows and pager state.
pub fn rows(page: Page<ShortLink>, base_url: &str) -> (Vec<LinkRow>, Pager) {
    let pager = Pager::from_page(&page);
    let rows = page
        .items
        .into_iter()
        .map(|link| LinkRow::new(link, base_url))
        .collect();

    (rows, pager)
}
