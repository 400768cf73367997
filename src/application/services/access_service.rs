//! Access control facade used by the HTTP layer.
//!
//! Every entry point takes the caller's session token as supplied by the
//! transport (possibly absent) and resolves it here, so handlers never pass
//! an account id they did not get from a session.

use std::sync::Arc;

use super::credential_service::CredentialService;
use super::link_service::LinkService;
use super::session_service::SessionService;
use super::visit_service::VisitService;
use crate::domain::entities::{Account, AccountId, Link, LinkDetails};
use crate::domain::repositories::{AccountRepository, LinkRepository, SessionRepository};
use crate::error::AppError;
use crate::utils::code_generator::{SHORT_CODE_LENGTH, VISITOR_TOKEN_LENGTH};
use crate::utils::password_hasher::PasswordHasher;

/// Default number of attempts when generated identifiers collide.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

/// Tunables for the facade and the services it composes.
#[derive(Clone)]
pub struct AccessSettings {
    pub password_pepper: String,
    pub short_code_length: usize,
    pub visitor_token_length: usize,
    pub max_code_attempts: usize,
}

impl AccessSettings {
    /// Settings with default lengths and attempt limits.
    pub fn new(password_pepper: impl Into<String>) -> Self {
        Self {
            password_pepper: password_pepper.into(),
            short_code_length: SHORT_CODE_LENGTH,
            visitor_token_length: VISITOR_TOKEN_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

/// An account together with the session opened for it.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub account: Account,
    pub session_token: String,
}

/// Store sizes reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub accounts: usize,
    pub links: usize,
    pub sessions: usize,
}

/// Entry points for registration, login and link management.
pub struct AccessService<A, L, S>
where
    A: AccountRepository,
    L: LinkRepository,
    S: SessionRepository,
{
    credentials: CredentialService<A>,
    sessions: SessionService<S, A>,
    links: LinkService<L>,
    visits: VisitService<L>,
}

impl<A, L, S> AccessService<A, L, S>
where
    A: AccountRepository,
    L: LinkRepository,
    S: SessionRepository,
{
    pub fn new(
        account_repository: Arc<A>,
        link_repository: Arc<L>,
        session_repository: Arc<S>,
        settings: AccessSettings,
    ) -> Self {
        let hasher = PasswordHasher::new(settings.password_pepper);

        Self {
            credentials: CredentialService::new(
                account_repository.clone(),
                hasher,
                settings.max_code_attempts,
            ),
            sessions: SessionService::new(session_repository, account_repository),
            links: LinkService::new(
                link_repository.clone(),
                settings.short_code_length,
                settings.max_code_attempts,
            ),
            visits: VisitService::new(link_repository, settings.visitor_token_length),
        }
    }

    /// Registers an account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingField`] or [`AppError::EmailAlreadyExists`].
    pub async fn handle_register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Authenticated, AppError> {
        let account = self.credentials.register(email, password).await?;
        let session_token = self.sessions.start_session(&account.id).await?;

        tracing::info!(account_id = %account.id, "Account registered");
        metrics::counter!("accounts_registered_total").increment(1);

        Ok(Authenticated {
            account,
            session_token,
        })
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] for an unknown email or a
    /// wrong password alike.
    pub async fn handle_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Authenticated, AppError> {
        let account = match self.credentials.verify(email, password).await {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!("Login failed");
                metrics::counter!("logins_total", "outcome" => "failure").increment(1);
                return Err(e);
            }
        };

        let session_token = self.sessions.start_session(&account.id).await?;

        tracing::info!(account_id = %account.id, "Login succeeded");
        metrics::counter!("logins_total", "outcome" => "success").increment(1);

        Ok(Authenticated {
            account,
            session_token,
        })
    }

    /// Ends the caller's session, if any.
    pub async fn handle_logout(&self, session_token: Option<&str>) -> Result<(), AppError> {
        match session_token {
            Some(token) => self.sessions.end_session(token).await,
            None => Ok(()),
        }
    }

    /// Creates a short link owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`] without a valid session.
    pub async fn handle_create_url(
        &self,
        session_token: Option<&str>,
        destination: String,
    ) -> Result<Link, AppError> {
        let owner_id = self.require_account(session_token).await?;
        let link = self.links.create(&owner_id, destination).await?;

        tracing::info!(account_id = %owner_id, code = %link.code, "Short link created");
        metrics::counter!("links_created_total").increment(1);

        Ok(link)
    }

    /// Lists the caller's links; anonymous callers get an empty list.
    pub async fn handle_list_urls(
        &self,
        session_token: Option<&str>,
    ) -> Result<Vec<Link>, AppError> {
        match self.resolve(session_token).await? {
            Some(owner_id) => self.links.list_for_owner(&owner_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Shows one of the caller's links with its visit history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`], [`AppError::NotFound`] or
    /// [`AppError::NotOwner`], checked in that order.
    pub async fn handle_view_url(
        &self,
        session_token: Option<&str>,
        code: &str,
    ) -> Result<LinkDetails, AppError> {
        let requester_id = self.require_account(session_token).await?;

        let details = self
            .links
            .details(code)
            .await?
            .ok_or_else(|| AppError::not_found(code))?;

        if !details.link.is_owned_by(&requester_id) {
            return Err(AppError::not_owner(code));
        }

        Ok(details)
    }

    /// Changes the destination of one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`], [`AppError::NotFound`] or
    /// [`AppError::NotOwner`].
    pub async fn handle_update_url(
        &self,
        session_token: Option<&str>,
        code: &str,
        destination: String,
    ) -> Result<Link, AppError> {
        let requester_id = self.require_account(session_token).await?;
        let link = self.links.update(code, &requester_id, destination).await?;

        tracing::info!(account_id = %requester_id, code, "Short link updated");

        Ok(link)
    }

    /// Deletes one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotAuthenticated`], [`AppError::NotFound`] or
    /// [`AppError::NotOwner`].
    pub async fn handle_delete_url(
        &self,
        session_token: Option<&str>,
        code: &str,
    ) -> Result<(), AppError> {
        let requester_id = self.require_account(session_token).await?;
        self.links.delete(code, &requester_id).await?;

        tracing::info!(account_id = %requester_id, code, "Short link deleted");

        Ok(())
    }

    /// Records a redirect and returns where to send the visitor.
    ///
    /// Open to anyone holding the code. The caller supplies `visitor_id`,
    /// issuing one via [`Self::issue_visitor_id`] on first contact.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn handle_redirect(&self, visitor_id: &str, code: &str) -> Result<String, AppError> {
        let destination = self.visits.record_visit(code, visitor_id).await?;
        metrics::counter!("redirects_total").increment(1);
        Ok(destination)
    }

    /// Mints a visitor token for a requester seen for the first time.
    pub fn issue_visitor_id(&self) -> String {
        self.visits.issue_visitor_id()
    }

    /// Returns the account behind a session, if any.
    pub async fn current_account(
        &self,
        session_token: Option<&str>,
    ) -> Result<Option<Account>, AppError> {
        match self.resolve(session_token).await? {
            Some(account_id) => self.credentials.find(&account_id).await,
            None => Ok(None),
        }
    }

    /// Reports the size of each store.
    pub async fn registry_stats(&self) -> Result<RegistryStats, AppError> {
        Ok(RegistryStats {
            accounts: self.credentials.count().await?,
            links: self.links.count().await?,
            sessions: self.sessions.count().await?,
        })
    }

    async fn resolve(&self, session_token: Option<&str>) -> Result<Option<AccountId>, AppError> {
        match session_token {
            Some(token) if !token.is_empty() => self.sessions.resolve(token).await,
            _ => Ok(None),
        }
    }

    async fn require_account(&self, session_token: Option<&str>) -> Result<AccountId, AppError> {
        self.resolve(session_token)
            .await?
            .ok_or(AppError::NotAuthenticated)
    }
}
