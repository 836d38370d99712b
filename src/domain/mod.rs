//! Domain layer containing business entities and rules.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access`] - Expiry and visibility rules for resolving a short key
//! - [`page`] - Pagination request/result types
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by
//! [`crate::infrastructure::persistence`].

pub mod access;
pub mod entities;
pub mod page;
pub mod repositories;
