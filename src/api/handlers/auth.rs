//! Handlers for registration, login and logout.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::auth::{AccountResponse, CredentialsRequest};
use crate::api::middleware::session::{SessionToken, clear_session_cookie, session_cookie};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and logs it in.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// { "email": "a@example.com", "password": "pw1" }
/// ```
///
/// # Response
///
/// `201 Created` with the account and a `session_id` cookie.
///
/// # Errors
///
/// - **400 Bad Request**: email or password empty
/// - **409 Conflict**: email already registered
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth = state
        .access
        .handle_register(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        [(
            header::SET_COOKIE,
            session_cookie(&auth.session_token, state.cookie_secure),
        )],
        Json(AccountResponse::from(&auth.account)),
    ))
}

/// Logs in with email and password.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// - **403 Forbidden**: unknown email or wrong password (same response for both)
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let auth = state
        .access
        .handle_login(&payload.email, &payload.password)
        .await?;

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&auth.session_token, state.cookie_secure),
        )],
        Json(AccountResponse::from(&auth.account)),
    ))
}

/// Ends the current session and clears the cookie.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Always succeeds with `204 No Content`, with or without a session.
pub async fn logout_handler(
    State(state): State<AppState>,
    session: SessionToken,
) -> Result<impl IntoResponse, AppError> {
    state.access.handle_logout(session.as_deref()).await?;

    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, clear_session_cookie(state.cookie_secure))],
    ))
}
