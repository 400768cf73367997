//! Repository trait for session token bindings.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for authenticated sessions.
///
/// Sessions have no expiry; they exist until removed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a session. Returns `Ok(false)` if the token is already bound.
    async fn insert(&self, session: Session) -> Result<bool, AppError>;

    /// Looks up a session by token.
    async fn find(&self, token: &str) -> Result<Option<Session>, AppError>;

    /// Removes a session. Returns `Ok(false)` if the token was unknown.
    async fn remove(&self, token: &str) -> Result<bool, AppError>;

    /// Counts live sessions.
    async fn count(&self) -> Result<usize, AppError>;
}
