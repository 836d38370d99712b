//! Repository trait for creators.

use crate::domain::entities::{Creator, CreatorRecord, NewCreator};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the identities that own links.
///
/// Used by the admin CLI to register creators before issuing tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    /// Registers a creator.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    async fn create(&self, new_creator: NewCreator) -> Result<Creator, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Creator>, AppError>;

    /// Lists every creator, oldest first.
    async fn list(&self) -> Result<Vec<CreatorRecord>, AppError>;
}
