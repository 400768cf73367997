//! DTOs for health check endpoint.

use serde::Serialize;

use crate::application::services::RegistryStats;

/// Health check response with store sizes.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub registry: RegistryCounts,
}

/// Number of entries held by each store.
#[derive(Debug, Serialize)]
pub struct RegistryCounts {
    pub accounts: usize,
    pub links: usize,
    pub sessions: usize,
}

impl From<RegistryStats> for RegistryCounts {
    fn from(stats: RegistryStats) -> Self {
        Self {
            accounts: stats.accounts,
            links: stats.links,
            sessions: stats.sessions,
        }
    }
}
