//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;
pub mod root;

pub use auth::{login_handler, logout_handler, register_handler};
pub use health::health_handler;
pub use links::{
    create_url_handler, delete_url_handler, list_urls_handler, update_url_handler,
    view_url_handler,
};
pub use redirect::redirect_handler;
pub use root::root_handler;
