//! API route configuration.
//!
//! Caller identity comes from cookies read by the extractors in
//! [`crate::api::middleware::session`]; there is no auth layer, so each
//! handler decides what an anonymous caller may do.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, health_handler, list_urls_handler, login_handler,
    logout_handler, redirect_handler, register_handler, root_handler, update_url_handler,
    view_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `GET    /`             - Redirect to `/urls`
/// - `POST   /register`     - Create an account and log in
/// - `POST   /login`        - Log in
/// - `POST   /logout`       - End the session
/// - `GET    /urls`         - List the caller's links
/// - `POST   /urls`         - Create a link
/// - `GET    /urls/{code}`  - Link details with visit log
/// - `PATCH  /urls/{code}`  - Change a link's destination
/// - `DELETE /urls/{code}`  - Delete a link
/// - `GET    /u/{code}`     - Public redirect
/// - `GET    /health`       - Health check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route(
            "/urls/{code}",
            get(view_url_handler)
                .patch(update_url_handler)
                .delete(delete_url_handler),
        )
        .route("/u/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
}
