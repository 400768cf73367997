//! Visit tracking for redirects.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::Visit;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Service recording redirects and minting visitor tokens.
///
/// Every redirect appends a [`Visit`] and increments the total count; the
/// visitor id is added to the unique set only on its first visit. All three
/// effects happen in one atomic repository call.
pub struct VisitService<L: LinkRepository> {
    repository: Arc<L>,
    visitor_token_length: usize,
}

impl<L: LinkRepository> VisitService<L> {
    pub fn new(repository: Arc<L>, visitor_token_length: usize) -> Self {
        Self {
            repository,
            visitor_token_length,
        }
    }

    /// Records a visit to `code` by `visitor_id` and returns the destination.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code; nothing is
    /// recorded in that case.
    pub async fn record_visit(&self, code: &str, visitor_id: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .record_visit(code, Visit::new(visitor_id, Utc::now()))
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        tracing::debug!(
            code,
            total_visits = link.total_visits,
            unique_visitors = link.unique_visitor_count(),
            "Visit recorded"
        );

        Ok(link.destination)
    }

    /// Mints a new long-lived visitor token for a first-time requester.
    pub fn issue_visitor_id(&self) -> String {
        generate_code(self.visitor_token_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AccountId, Link};
    use crate::domain::repositories::MockLinkRepository;

    fn visited_link(visitor_id: &str) -> Link {
        let mut link = Link::new(
            "abc123".to_string(),
            "http://example.com".to_string(),
            AccountId::new("owner1"),
            Utc::now(),
        );
        link.count_visit(visitor_id);
        link
    }

    #[tokio::test]
    async fn test_record_visit_returns_destination() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_record_visit()
            .withf(|code, visit| code == "abc123" && visit.visitor_id == "visitor-x")
            .times(1)
            .returning(|_, visit| Ok(Some(visited_link(&visit.visitor_id))));

        let service = VisitService::new(Arc::new(mock_repo), 36);

        let destination = service.record_visit("abc123", "visitor-x").await.unwrap();

        assert_eq!(destination, "http://example.com");
    }

    #[tokio::test]
    async fn test_record_visit_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_record_visit()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = VisitService::new(Arc::new(mock_repo), 36);

        let result = service.record_visit("missing", "visitor-x").await;

        assert!(matches!(result, Err(AppError::NotFound { code }) if code == "missing"));
    }

    #[test]
    fn test_issue_visitor_id_length() {
        let service = VisitService::new(Arc::new(MockLinkRepository::new()), 36);

        let first = service.issue_visitor_id();
        let second = service.issue_visitor_id();

        assert_eq!(first.len(), 36);
        assert_ne!(first, second);
    }
}
