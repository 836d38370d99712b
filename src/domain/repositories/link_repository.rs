//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Which links a listing query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFilter {
    /// Links with `is_private = false`.
    Public,
    /// Links created by the given creator.
    Owner(i64),
    /// Every link.
    All,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new short link with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short key is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Returns whether any link uses `short_key`.
    async fn exists_by_key(&self, short_key: &str) -> Result<bool, AppError>;

    /// Finds a link by its short key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` if found
    /// - `Ok(None)` if not found
    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortLink>, AppError>;

    /// Atomically adds one to the click counter of link `id`.
    ///
    /// Returns the new counter value, or `None` if the link no longer exists.
    /// Concurrent calls never lose updates.
    async fn increment_clicks(&self, id: i64) -> Result<Option<i64>, AppError>;

    /// Lists links matching `filter`, newest first.
    async fn list(
        &self,
        filter: LinkFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ShortLink>, AppError>;

    /// Counts links matching `filter`.
    async fn count(&self, filter: LinkFilter) -> Result<i64, AppError>;

    /// Deletes the links in `ids` that belong to `owner_id`.
    ///
    /// Links owned by anyone else are skipped. Returns the number of rows removed.
    async fn delete_owned(&self, ids: &[i64], owner_id: i64) -> Result<u64, AppError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}
