//! HTML template rendering handlers for the browser pages.

mod index;
mod login;
mod my_urls;
mod view;

pub use index::{create_form_handler, index_handler};
pub use login::{login_handler, login_submit_handler, logout_handler};
pub use my_urls::my_urls_handler;
