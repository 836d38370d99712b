//! Explicit pagination request and result types.

use serde::Serialize;

/// A page request as supplied by callers.
///
/// `page_no` is 1-based; any value `<= 1` addresses the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page_no: i64, page_size: i64) -> Self {
        Self { page_no, page_size }
    }

    /// Zero-based page index used by storage queries.
    pub fn zero_based_page(&self) -> i64 {
        if self.page_no > 1 { self.page_no - 1 } else { 0 }
    }

    /// The 1-based page number reported back to callers.
    pub fn effective_page_no(&self) -> i64 {
        self.zero_based_page() + 1
    }

    /// Row offset of the page; saturates for page numbers far past the end.
    pub fn offset(&self) -> i64 {
        self.zero_based_page().saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of results plus the metadata needed to render pagers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_no: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub is_first: bool,
    pub is_last: bool,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, request: PageRequest) -> Self {
        let page_no = request.effective_page_no();
        let page_size = request.page_size.max(1);
        let total_pages = (total_count + page_size - 1) / page_size;

        Self {
            items,
            total_count,
            page_no,
            page_size: request.page_size,
            total_pages,
            is_first: page_no == 1,
            is_last: page_no >= total_pages,
            has_next: page_no < total_pages,
            has_previous: page_no > 1,
        }
    }

    /// Converts every item while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_no: self.page_no,
            page_size: self.page_size,
            total_pages: self.total_pages,
            is_first: self.is_first,
            is_last: self.is_last,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
