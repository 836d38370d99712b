//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`url_checker`] - HTTP reachability probe for submitted URLs

pub mod persistence;
pub mod url_checker;
