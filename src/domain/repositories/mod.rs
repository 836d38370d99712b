//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern.
//! Concrete implementations live in `crate::infrastructure::persistence`;
//! mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage, lookup and click counting
//! - [`TokenRepository`] - API token authentication
//! - [`CreatorRepository`] - Link owners

pub mod creator_repository;
pub mod link_repository;
pub mod token_repository;

pub use creator_repository::CreatorRepository;
pub use link_repository::{LinkFilter, LinkRepository};
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use creator_repository::MockCreatorRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
