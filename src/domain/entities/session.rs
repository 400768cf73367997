//! Session entity binding an opaque token to an account.

use chrono::{DateTime, Utc};
use std::fmt;

use super::account::AccountId;

/// An authenticated session.
///
/// Holds nothing besides the binding; it lives until logout.
#[derive(Clone)]
pub struct Session {
    pub token: String,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, account_id: AccountId, created_at: DateTime<Utc>) -> Self {
        Self {
            token,
            account_id,
            created_at,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("account_id", &self.account_id)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
