//! In-memory implementation of account repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Account, AccountId, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

#[derive(Default)]
struct AccountStore {
    by_id: HashMap<AccountId, Account>,
    id_by_email: HashMap<String, AccountId>,
}

/// In-process account store.
///
/// Keeps an email index next to the primary map so uniqueness checks and
/// login lookups are O(1). Both maps change under one write guard.
#[derive(Default)]
pub struct MemoryAccountRepository {
    state: RwLock<AccountStore>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Option<Account>, AppError> {
        let mut state = self.state.write().await;

        if state.id_by_email.contains_key(&new_account.email) {
            return Err(AppError::EmailAlreadyExists);
        }

        if state.by_id.contains_key(&new_account.id) {
            return Ok(None);
        }

        let account = Account::new(
            new_account.id,
            new_account.email,
            new_account.password_hash,
            Utc::now(),
        );

        state
            .id_by_email
            .insert(account.email.clone(), account.id.clone());
        state.by_id.insert(account.id.clone(), account.clone());

        Ok(Some(account))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let state = self.state.read().await;

        Ok(state
            .id_by_email
            .get(email)
            .and_then(|id| state.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AppError> {
        Ok(self.state.read().await.by_id.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.state.read().await.by_id.len())
    }
}
