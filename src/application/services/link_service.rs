//! Short link registry service.

use std::sync::Arc;

use crate::domain::entities::{AccountId, Link, LinkDetails, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Service for creating, reading and mutating short links.
///
/// Destinations are opaque: any string is accepted and stored as given.
/// Mutations always carry the requester id, which the repository compares
/// with the link owner inside the same critical section as the write.
pub struct LinkService<L: LinkRepository> {
    repository: Arc<L>,
    code_length: usize,
    max_attempts: usize,
}

impl<L: LinkRepository> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `repository` - link store
    /// - `code_length` - length of generated short codes
    /// - `max_attempts` - code generation attempts before giving up
    pub fn new(repository: Arc<L>, code_length: usize, max_attempts: usize) -> Self {
        Self {
            repository,
            code_length,
            max_attempts,
        }
    }

    /// Creates a short link owned by `owner_id`.
    ///
    /// # Code Generation
    ///
    /// Generates a random code and inserts it only if the code is free,
    /// regenerating on collision up to `max_attempts` times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CapacityExhausted`] if every attempt collided.
    pub async fn create(
        &self,
        owner_id: &AccountId,
        destination: String,
    ) -> Result<Link, AppError> {
        for _ in 0..self.max_attempts {
            let new_link = NewLink {
                code: generate_code(self.code_length),
                destination: destination.clone(),
                owner_id: owner_id.clone(),
            };

            if let Some(link) = self.repository.try_insert(new_link).await? {
                return Ok(link);
            }

            tracing::debug!("Short code collision, regenerating");
        }

        Err(AppError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Retrieves a link by its short code.
    pub async fn get(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.repository.find_by_code(code).await
    }

    /// Lists all links owned by `owner_id`.
    pub async fn list_for_owner(&self, owner_id: &AccountId) -> Result<Vec<Link>, AppError> {
        self.repository.list_by_owner(owner_id).await
    }

    /// Replaces the destination of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::NotOwner`] if `requester_id` does not own it.
    pub async fn update(
        &self,
        code: &str,
        requester_id: &AccountId,
        destination: String,
    ) -> Result<Link, AppError> {
        self.repository
            .update_destination(code, requester_id, destination)
            .await
    }

    /// Deletes a link and its visit history.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn delete(&self, code: &str, requester_id: &AccountId) -> Result<(), AppError> {
        self.repository.delete(code, requester_id).await
    }

    /// Retrieves a link and its visit history as one consistent snapshot.
    pub async fn details(&self, code: &str) -> Result<Option<LinkDetails>, AppError> {
        self.repository.find_details(code).await
    }

    /// Counts links in the registry.
    pub async fn count(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}
