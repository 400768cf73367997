//! Application error type shared by the services and the HTTP adapter.
//!
//! Every failure the core can report is a distinct [`AppError`] variant so the
//! calling layer can pick the status code and message. Errors never carry
//! plaintext passwords or stored hashes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned in JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// A required input was empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Unknown email and wrong password both map here.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Short link not found")]
    NotFound { code: String },

    #[error("Short link belongs to another account")]
    NotOwner { code: String },

    /// Random identifier generation kept colliding with existing keys.
    #[error("Failed to generate a unique identifier after {attempts} attempts")]
    CapacityExhausted { attempts: usize },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn not_owner(code: impl Into<String>) -> Self {
        Self::NotOwner { code: code.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable error code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::EmailAlreadyExists => "email_already_exists",
            Self::InvalidCredentials => "invalid_credentials",
            Self::NotAuthenticated => "not_authenticated",
            Self::NotFound { .. } => "not_found",
            Self::NotOwner { .. } => "not_owner",
            Self::CapacityExhausted { .. } => "capacity_exhausted",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField { .. } => StatusCode::BAD_REQUEST,
            Self::EmailAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::FORBIDDEN,
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::NotOwner { .. } => StatusCode::FORBIDDEN,
            Self::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the JSON payload shape used by the API.
    ///
    /// Operational failures are reported with a generic message so internal
    /// details do not reach clients; they are logged instead.
    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            Self::MissingField { field } => json!({ "field": field }),
            Self::NotFound { code } | Self::NotOwner { code } => json!({ "code": code }),
            _ => json!({}),
        };

        let message = match self {
            Self::CapacityExhausted { .. } | Self::Internal { .. } => {
                "Service temporarily unavailable".to_string()
            }
            other => other.to_string(),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingField { field: "email" }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotAuthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_found("abc").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::not_owner("abc").status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::CapacityExhausted { attempts: 10 }.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_not_owner_and_not_authenticated_are_distinct() {
        assert_ne!(
            AppError::not_owner("abc").code(),
            AppError::NotAuthenticated.code()
        );
    }

    #[test]
    fn test_missing_field_details() {
        let info = AppError::MissingField { field: "password" }.to_error_info();

        assert_eq!(info.code, "missing_field");
        assert_eq!(info.message, "password is required");
        assert_eq!(info.details["field"], "password");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let info = AppError::internal("lock poisoned at store.rs:42").to_error_info();

        assert_eq!(info.code, "internal_error");
        assert!(!info.message.contains("store.rs"));
    }
}
