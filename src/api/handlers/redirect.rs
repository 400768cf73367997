//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::api::middleware::session::{VisitorToken, visitor_cookie};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /u/{code}`
///
/// # Request Flow
///
/// 1. Read the `visitor_id` cookie, minting a new token if absent
/// 2. Record the visit (total count, unique set, visit log)
/// 3. Return 307 Temporary Redirect, setting the cookie if it was minted
///
/// Nothing after step 2 can fail, so a recorded visit always produces a
/// redirect and, for a new visitor, the cookie.
///
/// No session is required.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    State(state): State<AppState>,
    VisitorToken(visitor_id): VisitorToken,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (visitor_id, issued) = match visitor_id {
        Some(id) => (id, false),
        None => (state.access.issue_visitor_id(), true),
    };

    let destination = state.access.handle_redirect(&visitor_id, &code).await?;
    let location = location_header(&destination);

    let set_cookie = issued.then(|| {
        [(
            header::SET_COOKIE,
            visitor_cookie(&visitor_id, state.cookie_secure),
        )]
    });

    Ok((
        StatusCode::TEMPORARY_REDIRECT,
        set_cookie,
        [(header::LOCATION, location)],
    ))
}

/// Builds a `Location` value from a destination stored verbatim.
///
/// Every byte that is not visible ASCII is percent-encoded, so the result is
/// always a valid header value.
fn location_header(destination: &str) -> HeaderValue {
    let mut encoded = String::with_capacity(destination.len());

    for byte in destination.bytes() {
        if byte.is_ascii_graphic() {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    HeaderValue::from_str(&encoded).unwrap_or_else(|_| HeaderValue::from_static("/"))
}
