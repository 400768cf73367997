//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{AccountId, Link, LinkDetails, NewLink, Visit};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// A link and the visits recorded against it.
struct LinkRecord {
    link: Link,
    visits: Vec<Visit>,
}

/// In-process link registry.
///
/// All links live in one map keyed by short code. Compound operations
/// (insert-if-absent, owner check plus write, visit recording) each run under
/// a single write guard with no suspension point inside, so they are atomic
/// with respect to concurrent requests.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, LinkRecord>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolves `code` to a record owned by `requester_id`.
fn owned_record<'a>(
    links: &'a mut HashMap<String, LinkRecord>,
    code: &str,
    requester_id: &AccountId,
) -> Result<&'a mut LinkRecord, AppError> {
    let record = links
        .get_mut(code)
        .ok_or_else(|| AppError::not_found(code))?;

    if !record.link.is_owned_by(requester_id) {
        return Err(AppError::not_owner(code));
    }

    Ok(record)
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn try_insert(&self, new_link: NewLink) -> Result<Option<Link>, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.code) {
            return Ok(None);
        }

        let link = new_link.into_link(Utc::now());
        links.insert(
            link.code.clone(),
            LinkRecord {
                link: link.clone(),
                visits: Vec::new(),
            },
        );

        Ok(Some(link))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .read()
            .await
            .get(code)
            .map(|record| record.link.clone()))
    }

    async fn list_by_owner(&self, owner_id: &AccountId) -> Result<Vec<Link>, AppError> {
        let links = self.links.read().await;

        let mut owned: Vec<Link> = links
            .values()
            .filter(|record| record.link.is_owned_by(owner_id))
            .map(|record| record.link.clone())
            .collect();

        owned.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });

        Ok(owned)
    }

    async fn update_destination(
        &self,
        code: &str,
        requester_id: &AccountId,
        destination: String,
    ) -> Result<Link, AppError> {
        let mut links = self.links.write().await;
        let record = owned_record(&mut links, code, requester_id)?;

        record.link.destination = destination;

        Ok(record.link.clone())
    }

    async fn delete(&self, code: &str, requester_id: &AccountId) -> Result<(), AppError> {
        let mut links = self.links.write().await;
        owned_record(&mut links, code, requester_id)?;

        links.remove(code);

        Ok(())
    }

    async fn record_visit(&self, code: &str, visit: Visit) -> Result<Option<Link>, AppError> {
        let mut links = self.links.write().await;

        let Some(record) = links.get_mut(code) else {
            return Ok(None);
        };

        record.link.count_visit(&visit.visitor_id);
        record.visits.push(visit);

        Ok(Some(record.link.clone()))
    }

    async fn find_details(&self, code: &str) -> Result<Option<LinkDetails>, AppError> {
        Ok(self
            .links
            .read()
            .await
            .get(code)
            .map(|record| LinkDetails {
                link: record.link.clone(),
                visits: record.visits.clone(),
            }))
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.links.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn owner() -> AccountId {
        AccountId::new("owner1")
    }

    fn stranger() -> AccountId {
        AccountId::new("stranger")
    }

    async fn visit_count(repo: &MemoryLinkRepository, code: &str) -> usize {
        repo.find_details(code)
            .await
            .unwrap()
            .map_or(0, |details| details.visits.len())
    }

    async fn seeded(code: &str) -> MemoryLinkRepository {
        let repo = MemoryLinkRepository::new();
        repo.try_insert(NewLink {
            code: code.to_string(),
            destination: "https://example.com".to_string(),
            owner_id: owner(),
        })
        .await
        .unwrap()
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_try_insert_rejects_taken_code() {
        let repo = seeded("abc123").await;

        let second = repo
            .try_insert(NewLink {
                code: "abc123".to_string(),
                destination: "https://other.com".to_string(),
                owner_id: stranger(),
            })
            .await
            .unwrap();

        assert!(second.is_none());
        let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(stored.destination, "https://example.com");
        assert_eq!(stored.owner_id, owner());
    }

    #[tokio::test]
    async fn test_update_by_owner_preserves_counters() {
        let repo = seeded("abc123").await;
        repo.record_visit("abc123", Visit::new("v1", Utc::now()))
            .await
            .unwrap();
        let before = repo.find_by_code("abc123").await.unwrap().unwrap();

        let updated = repo
            .update_destination("abc123", &owner(), "https://new.com".to_string())
            .await
            .unwrap();

        assert_eq!(updated.destination, "https://new.com");
        assert_eq!(updated.total_visits, 1);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(visit_count(&repo, "abc123").await, 1);
    }

    #[tokio::test]
    async fn test_update_by_stranger_fails_and_leaves_link() {
        let repo = seeded("abc123").await;

        let result = repo
            .update_destination("abc123", &stranger(), "https://evil.com".to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotOwner { .. })));
        let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(stored.destination, "https://example.com");
    }

    #[tokio::test]
    async fn test_update_missing_code() {
        let repo = MemoryLinkRepository::new();

        let result = repo
            .update_destination("nope", &owner(), "https://new.com".to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_rules() {
        let repo = seeded("abc123").await;

        let by_stranger = repo.delete("abc123", &stranger()).await;
        assert!(matches!(by_stranger, Err(AppError::NotOwner { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete("abc123", &owner()).await.unwrap();
        assert!(repo.find_by_code("abc123").await.unwrap().is_none());
        assert!(repo.find_details("abc123").await.unwrap().is_none());

        let again = repo.delete("abc123", &owner()).await;
        assert!(matches!(again, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_record_visit_missing_code_records_nothing() {
        let repo = MemoryLinkRepository::new();

        let result = repo
            .record_visit("nope", Visit::new("v1", Utc::now()))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(visit_count(&repo, "nope").await, 0);
    }

    #[tokio::test]
    async fn test_list_by_owner_filters() {
        let repo = seeded("abc123").await;
        repo.try_insert(NewLink {
            code: "zzz999".to_string(),
            destination: "https://other.com".to_string(),
            owner_id: stranger(),
        })
        .await
        .unwrap();

        let mine = repo.list_by_owner(&owner()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].code, "abc123");

        let none = repo.list_by_owner(&AccountId::new("nobody")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_visits_are_not_lost() {
        let repo = Arc::new(seeded("abc123").await);

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    let visitor = format!("visitor-{}", i % 10);
                    repo.record_visit("abc123", Visit::new(visitor, Utc::now()))
                        .await
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let link = repo.find_by_code("abc123").await.unwrap().unwrap();
        assert_eq!(link.total_visits, 200);
        assert_eq!(link.unique_visitor_count(), 10);
        assert_eq!(visit_count(&repo, "abc123").await, 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_details_are_consistent_under_concurrent_visits() {
        let repo = Arc::new(seeded("abc123").await);

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    repo.record_visit("abc123", Visit::new(format!("v{i}"), Utc::now()))
                        .await
                        .unwrap();
                }
            })
        };

        for _ in 0..200 {
            let details = repo.find_details("abc123").await.unwrap().unwrap();
            assert_eq!(details.link.total_visits as usize, details.visits.len());
        }

        writer.await.unwrap();
    }
}
