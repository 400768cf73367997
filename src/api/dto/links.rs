//! DTOs for short link management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::AccountResponse;
use crate::domain::entities::{Link, LinkDetails, Visit};

/// Request body for `POST /urls`.
///
/// The destination is stored as given; no URL validation is applied.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    #[serde(alias = "long_url")]
    pub destination: String,
}

/// Request body for `PATCH /urls/{code}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUrlRequest {
    #[serde(alias = "long_url")]
    pub destination: String,
}

/// JSON representation of a short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub destination: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: u64,
    pub unique_visitors: usize,
}

impl LinkResponse {
    pub fn new(link: &Link, short_url: String) -> Self {
        Self {
            code: link.code.clone(),
            destination: link.destination.clone(),
            short_url,
            created_at: link.created_at,
            total_visits: link.total_visits,
            unique_visitors: link.unique_visitor_count(),
        }
    }
}

/// Response for `GET /urls`: the caller's account (if any) and its links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub account: Option<AccountResponse>,
    pub urls: Vec<LinkResponse>,
}

/// A single recorded redirect.
#[derive(Debug, Serialize)]
pub struct VisitResponse {
    pub visitor_id: String,
    pub visited_at: DateTime<Utc>,
}

impl From<Visit> for VisitResponse {
    fn from(visit: Visit) -> Self {
        Self {
            visitor_id: visit.visitor_id,
            visited_at: visit.visited_at,
        }
    }
}

/// Response for `GET /urls/{code}`: the link plus its visit log.
#[derive(Debug, Serialize)]
pub struct LinkDetailsResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub visits: Vec<VisitResponse>,
}

impl LinkDetailsResponse {
    pub fn new(details: LinkDetails, short_url: String) -> Self {
        Self {
            link: LinkResponse::new(&details.link, short_url),
            visits: details.visits.into_iter().map(VisitResponse::from).collect(),
        }
    }
}
