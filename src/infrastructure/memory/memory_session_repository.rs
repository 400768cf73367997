//! In-memory implementation of session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// In-process token → session map.
#[derive(Default)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn insert(&self, session: Session) -> Result<bool, AppError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&session.token) {
            return Ok(false);
        }

        sessions.insert(session.token.clone(), session);
        Ok(true)
    }

    async fn find(&self, token: &str) -> Result<Option<Session>, AppError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AccountId;
    use chrono::Utc;

    fn session(token: &str, account: &str) -> Session {
        Session::new(token.to_string(), AccountId::new(account), Utc::now())
    }

    #[tokio::test]
    async fn test_insert_find_remove() {
        let repo = MemorySessionRepository::new();

        assert!(repo.insert(session("tok1", "acc1")).await.unwrap());

        let found = repo.find("tok1").await.unwrap().unwrap();
        assert_eq!(found.account_id, AccountId::new("acc1"));

        assert!(repo.remove("tok1").await.unwrap());
        assert!(repo.find("tok1").await.unwrap().is_none());
        assert!(!repo.remove("tok1").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_does_not_overwrite_existing_token() {
        let repo = MemorySessionRepository::new();
        repo.insert(session("tok1", "acc1")).await.unwrap();

        assert!(!repo.insert(session("tok1", "acc2")).await.unwrap());

        let found = repo.find("tok1").await.unwrap().unwrap();
        assert_eq!(found.account_id, AccountId::new("acc1"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
