//! Browser pages for creating and managing links.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Login gate for owner pages
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
