//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short key → original URL mapping
//! - [`Creator`] - The identity that owns links
//!
//! Creation inputs live in separate structs (`NewShortLink`, `NewCreator`)
//! so that store-assigned fields never have to be faked.

pub mod creator;
pub mod link;

pub use creator::{Creator, CreatorRecord, NewCreator, Role};
pub use link::{NewShortLink, ShortLink};
