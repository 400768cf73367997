//! Handlers for short link management.
//!
//! All endpoints identify the caller through the `session_id` cookie.
//! Listing is open to anonymous callers (empty result); everything else
//! requires a session and, for a specific code, ownership.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::auth::AccountResponse;
use crate::api::dto::links::{
    CreateUrlRequest, LinkDetailsResponse, LinkListResponse, LinkResponse, UpdateUrlRequest,
};
use crate::api::middleware::session::SessionToken;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's short links.
///
/// # Endpoint
///
/// `GET /urls`
///
/// # Response
///
/// ```json
/// {
///   "account": { "id": "...", "email": "a@example.com", "created_at": "..." },
///   "urls": [
///     {
///       "code": "abc123",
///       "destination": "https://example.com",
///       "short_url": "http://localhost:8080/u/abc123",
///       "created_at": "...",
///       "total_visits": 2,
///       "unique_visitors": 1
///     }
///   ]
/// }
/// ```
///
/// Anonymous callers get `"account": null` and an empty list.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    session: SessionToken,
) -> Result<Json<LinkListResponse>, AppError> {
    let account = state.access.current_account(session.as_deref()).await?;
    let links = state.access.handle_list_urls(session.as_deref()).await?;

    let urls = links
        .iter()
        .map(|link| LinkResponse::new(link, state.short_url(&link.code)))
        .collect();

    Ok(Json(LinkListResponse {
        account: account.as_ref().map(AccountResponse::from),
        urls,
    }))
}

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Errors
///
/// - **401 Unauthorized**: no valid session
/// - **503 Service Unavailable**: no free code found
pub async fn create_url_handler(
    State(state): State<AppState>,
    session: SessionToken,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state
        .access
        .handle_create_url(session.as_deref(), payload.destination)
        .await?;

    let short_url = state.short_url(&link.code);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(&link, short_url))))
}

/// Shows one of the caller's links with its visit log.
///
/// # Endpoint
///
/// `GET /urls/{code}`
///
/// # Errors
///
/// - **401 Unauthorized**: no valid session
/// - **404 Not Found**: unknown code
/// - **403 Forbidden**: link owned by another account
pub async fn view_url_handler(
    State(state): State<AppState>,
    session: SessionToken,
    Path(code): Path<String>,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let details = state
        .access
        .handle_view_url(session.as_deref(), &code)
        .await?;

    let short_url = state.short_url(&details.link.code);

    Ok(Json(LinkDetailsResponse::new(details, short_url)))
}

/// Changes the destination of one of the caller's links.
///
/// # Endpoint
///
/// `PATCH /urls/{code}`
///
/// Visit counts are preserved.
pub async fn update_url_handler(
    State(state): State<AppState>,
    session: SessionToken,
    Path(code): Path<String>,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .access
        .handle_update_url(session.as_deref(), &code, payload.destination)
        .await?;

    let short_url = state.short_url(&link.code);

    Ok(Json(LinkResponse::new(&link, short_url)))
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /urls/{code}`
///
/// Returns `204 No Content`; the code stops redirecting immediately.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    session: SessionToken,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .access
        .handle_delete_url(session.as_deref(), &code)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
