//! Link entity representing a short code mapping owned by an account.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::account::AccountId;
use super::visit::Visit;

/// A short code mapped to a destination, with visit counters.
///
/// `total_visits` counts every redirect, while `unique_visitors` holds each
/// distinct visitor id once. A repeat visitor therefore bumps the former but
/// not the latter.
#[derive(Debug, Clone)]
pub struct Link {
    pub code: String,
    pub destination: String,
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub total_visits: u64,
    pub unique_visitors: HashSet<String>,
}

impl Link {
    /// Creates a link with no recorded visits.
    pub fn new(
        code: String,
        destination: String,
        owner_id: AccountId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            destination,
            owner_id,
            created_at,
            total_visits: 0,
            unique_visitors: HashSet::new(),
        }
    }

    pub fn is_owned_by(&self, account_id: &AccountId) -> bool {
        &self.owner_id == account_id
    }

    pub fn unique_visitor_count(&self) -> usize {
        self.unique_visitors.len()
    }

    /// Counts one redirect by `visitor_id`.
    ///
    /// Returns `true` if this is the first visit from that visitor.
    pub fn count_visit(&mut self, visitor_id: &str) -> bool {
        self.total_visits += 1;
        self.unique_visitors.insert(visitor_id.to_string())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub destination: String,
    pub owner_id: AccountId,
}

impl NewLink {
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.destination, self.owner_id, created_at)
    }
}

/// A link together with its visit history, as shown to its owner.
#[derive(Debug, Clone)]
pub struct LinkDetails {
    pub link: Link,
    pub visits: Vec<Visit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> AccountId {
        AccountId::new("owner1")
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner(),
            now,
        );

        assert_eq!(link.code, "abc123");
        assert_eq!(link.destination, "https://example.com");
        assert_eq!(link.created_at, now);
        assert_eq!(link.total_visits, 0);
        assert_eq!(link.unique_visitor_count(), 0);
    }

    #[test]
    fn test_link_ownership() {
        let link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner(),
            Utc::now(),
        );

        assert!(link.is_owned_by(&owner()));
        assert!(!link.is_owned_by(&AccountId::new("someone-else")));
    }

    #[test]
    fn test_count_visit_dedups_visitors_but_not_totals() {
        let mut link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner(),
            Utc::now(),
        );

        assert!(link.count_visit("visitor-x"));
        assert!(!link.count_visit("visitor-x"));
        assert!(link.count_visit("visitor-y"));

        assert_eq!(link.total_visits, 3);
        assert_eq!(link.unique_visitor_count(), 2);
    }

    #[test]
    fn test_new_link_into_link() {
        let now = Utc::now();
        let link = NewLink {
            code: "xyz789".to_string(),
            destination: "not even a url".to_string(),
            owner_id: owner(),
        }
        .into_link(now);

        assert_eq!(link.code, "xyz789");
        assert_eq!(link.destination, "not even a url");
        assert_eq!(link.created_at, now);
        assert_eq!(link.total_visits, 0);
    }
}
