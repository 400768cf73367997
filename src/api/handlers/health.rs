//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns service status and store sizes.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "registry": { "accounts": 2, "links": 5, "sessions": 3 }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    let stats = state.access.registry_stats().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        registry: stats.into(),
    }))
}
