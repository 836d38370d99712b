//! Pagination query parameters.

use serde::Deserialize;
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::page::PageRequest;
use crate::error::AppError;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Builds a [`PageRequest`], falling back to `default_page_size`.
    ///
    /// Page numbers are 1-based; zero and negative numbers address the first
    /// page, matching the lenient paging of the HTML pages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the page size is outside `1..=100`.
    pub fn to_page_request(&self, default_page_size: i64) -> Result<PageRequest, AppError> {
        let page_no = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(default_page_size);

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                "Page size must be between 1 and 100",
                json!({ "page_size": page_size }),
            ));
        }

        Ok(PageRequest::new(page_no, page_size))
    }
}
