//! HTTP middleware for request processing and protection.
//!
//! Provides identity resolution, rate limiting, and observability middleware.

pub mod identity;
pub mod rate_limit;
pub mod tracing;
