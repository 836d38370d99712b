//! Utility functions shared across layers.
//!
//! - [`key_generator`] - Short key generation and collision-retry allocation
//! - [`token`] - API token generation and HMAC hashing
//! - [`url_validation`] - Syntactic checks for submitted URLs

pub mod key_generator;
pub mod token;
pub mod url_validation;
