//! Repository trait for account storage.

use crate::domain::entities::{Account, AccountId, NewAccount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered accounts.
///
/// Accounts are never deleted or mutated after creation.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryAccountRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Stores a new account if both its email and id are free.
    ///
    /// The email check and the insert happen atomically.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Account))` on success
    /// - `Ok(None)` if the generated id collides with an existing account
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyExists`] if an account already uses the
    /// exact same email. The store is left unchanged.
    async fn create(&self, new_account: NewAccount) -> Result<Option<Account>, AppError>;

    /// Finds an account by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AppError>;

    /// Counts registered accounts.
    async fn count(&self) -> Result<usize, AppError>;
}
