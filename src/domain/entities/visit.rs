//! Visit entity representing a single redirect through a short code.

use chrono::{DateTime, Utc};

/// A redirect recorded in a link's history.
///
/// `visitor_id` comes from the requester's long-lived visitor token, not from
/// the session, so anonymous visitors are tracked too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub visitor_id: String,
    pub visited_at: DateTime<Utc>,
}

impl Visit {
    pub fn new(visitor_id: impl Into<String>, visited_at: DateTime<Utc>) -> Self {
        Self {
            visitor_id: visitor_id.into(),
            visited_at,
        }
    }
}
