//! Repository trait for short link data access.

use crate::domain::entities::{AccountId, Link, LinkDetails, NewLink, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links and their visit history.
///
/// This is the single source of truth for ownership. Every mutating method
/// takes the requester id and performs the owner check inside the same
/// critical section as the write, so a check can never be separated from the
/// change it guards.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryLinkRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with `created_at = now` and zeroed counters
    /// - `Ok(None)` if the code collides with an existing link
    async fn try_insert(&self, new_link: NewLink) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link owned by `owner_id`, oldest first.
    async fn list_by_owner(&self, owner_id: &AccountId) -> Result<Vec<Link>, AppError>;

    /// Replaces the destination of a link owned by `requester_id`.
    ///
    /// Counters, visit history and creation time are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::NotOwner`] if `requester_id` is not the owner.
    async fn update_destination(
        &self,
        code: &str,
        requester_id: &AccountId,
        destination: String,
    ) -> Result<Link, AppError>;

    /// Removes a link owned by `requester_id`, along with its visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::NotOwner`] if `requester_id` is not the owner.
    async fn delete(&self, code: &str, requester_id: &AccountId) -> Result<(), AppError>;

    /// Appends a visit and updates the counters in one atomic step.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the updated counters
    /// - `Ok(None)` if the code does not exist (nothing is recorded)
    async fn record_visit(&self, code: &str, visit: Visit) -> Result<Option<Link>, AppError>;

    /// Finds a link together with its visit history, in the order visits
    /// happened.
    ///
    /// Both are read under one guard, so `total_visits` always equals the
    /// number of visits returned.
    async fn find_details(&self, code: &str) -> Result<Option<LinkDetails>, AppError>;

    /// Counts links in the registry.
    async fn count(&self) -> Result<usize, AppError>;
}
