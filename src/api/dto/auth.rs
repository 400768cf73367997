//! DTOs for registration, login and the current account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::Account;

/// Request body for `POST /register` and `POST /login`.
///
/// Absent fields deserialize as empty strings so the service can report
/// which one is missing.
#[derive(Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}
