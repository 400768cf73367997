//! Session identity: binding opaque tokens to accounts.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{AccountId, Session};
use crate::domain::repositories::{AccountRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::code_generator::generate_session_token;

/// Token attempts before giving up. Tokens carry 256 bits of entropy, so a
/// single retry is already never expected.
const MAX_TOKEN_ATTEMPTS: usize = 3;

/// Service issuing, resolving and ending sessions.
///
/// An unknown token is not an error: it simply resolves to no account and
/// callers treat the request as anonymous.
pub struct SessionService<S: SessionRepository, A: AccountRepository> {
    sessions: Arc<S>,
    accounts: Arc<A>,
}

impl<S: SessionRepository, A: AccountRepository> SessionService<S, A> {
    pub fn new(sessions: Arc<S>, accounts: Arc<A>) -> Self {
        Self { sessions, accounts }
    }

    /// Starts a new session for `account_id` and returns its token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CapacityExhausted`] if every generated token
    /// collided, or [`AppError::Internal`] if entropy is unavailable.
    pub async fn start_session(&self, account_id: &AccountId) -> Result<String, AppError> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = generate_session_token()?;
            let session = Session::new(token.clone(), account_id.clone(), Utc::now());

            if self.sessions.insert(session).await? {
                return Ok(token);
            }
        }

        Err(AppError::CapacityExhausted {
            attempts: MAX_TOKEN_ATTEMPTS,
        })
    }

    /// Resolves a token to the account it is bound to.
    ///
    /// Returns `None` for unknown or ended sessions, and for sessions whose
    /// account cannot be found.
    pub async fn resolve(&self, token: &str) -> Result<Option<AccountId>, AppError> {
        let Some(session) = self.sessions.find(token).await? else {
            return Ok(None);
        };

        let exists = self
            .accounts
            .find_by_id(&session.account_id)
            .await?
            .is_some();

        Ok(exists.then_some(session.account_id))
    }

    /// Ends a session. Ending an unknown or already ended session is a no-op.
    pub async fn end_session(&self, token: &str) -> Result<(), AppError> {
        if self.sessions.remove(token).await? {
            tracing::debug!("Session ended");
        }
        Ok(())
    }

    /// Counts live sessions.
    pub async fn count(&self) -> Result<usize, AppError> {
        self.sessions.count().await
    }
}
