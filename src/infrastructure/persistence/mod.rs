//! Repository implementations.
//!
//! PostgreSQL repositories use SQLx with bound parameters; [`MemoryStore`]
//! implements the same traits in-process.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Short link storage and click counting
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`PgCreatorRepository`] - Link owners
//! - [`MemoryStore`] - All of the above, in memory

pub mod memory_store;
pub mod pg_creator_repository;
pub mod pg_link_repository;
pub mod pg_token_repository;

pub use memory_store::MemoryStore;
pub use pg_creator_repository::PgCreatorRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
