//! Handler for the service root.

use axum::response::Redirect;

/// Sends the browser to the link listing.
///
/// # Endpoint
///
/// `GET /` - `303 See Other` to `/urls`
pub async fn root_handler() -> Redirect {
    Redirect::to("/urls")
}
