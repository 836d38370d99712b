//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod short_urls;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use short_urls::{
    create_short_url_handler, delete_my_handler, list_all_handler, list_my_handler,
    list_public_handler,
};
