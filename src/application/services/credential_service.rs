//! Account registration and credential verification.

use std::sync::Arc;

use crate::domain::entities::{Account, AccountId, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::utils::code_generator::{ACCOUNT_ID_LENGTH, generate_code};
use crate::utils::password_hasher::PasswordHasher;

/// Well-formed stored hash (zero salt, zero MAC) checked against when the
/// email is unknown. No password matches it.
const UNKNOWN_ACCOUNT_HASH: &str = concat!(
    "00000000000000000000000000000000",
    "$",
    "0000000000000000000000000000000000000000000000000000000000000000",
);

/// Service owning account creation and password checks.
///
/// Passwords are hashed before anything touches the store and are never
/// logged or returned.
pub struct CredentialService<A: AccountRepository> {
    repository: Arc<A>,
    hasher: PasswordHasher,
    max_attempts: usize,
}

impl<A: AccountRepository> CredentialService<A> {
    /// Creates a new credential service.
    ///
    /// # Arguments
    ///
    /// - `repository` - account store
    /// - `hasher` - password hasher holding the server pepper
    /// - `max_attempts` - id generation attempts before giving up
    pub fn new(repository: Arc<A>, hasher: PasswordHasher, max_attempts: usize) -> Self {
        Self {
            repository,
            hasher,
            max_attempts,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingField`] if `email` or `password` is empty.
    /// Returns [`AppError::EmailAlreadyExists`] if the exact email is taken.
    /// Returns [`AppError::CapacityExhausted`] if no free account id was found.
    pub async fn register(&self, email: &str, password: &str) -> Result<Account, AppError> {
        if email.is_empty() {
            return Err(AppError::MissingField { field: "email" });
        }
        if password.is_empty() {
            return Err(AppError::MissingField { field: "password" });
        }

        let password_hash = self.hasher.hash(password)?;

        for _ in 0..self.max_attempts {
            let new_account = NewAccount {
                id: AccountId::new(generate_code(ACCOUNT_ID_LENGTH)),
                email: email.to_string(),
                password_hash: password_hash.clone(),
            };

            if let Some(account) = self.repository.create(new_account).await? {
                return Ok(account);
            }
        }

        Err(AppError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Verifies an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] both when the email is unknown
    /// and when the password does not match.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let Some(account) = self.repository.find_by_email(email).await? else {
            // Same MAC work as a known email, so timing does not reveal it.
            self.hasher.verify(password, UNKNOWN_ACCOUNT_HASH);
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &account.password_hash) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Looks up an account by id.
    pub async fn find(&self, id: &AccountId) -> Result<Option<Account>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Counts registered accounts.
    pub async fn count(&self) -> Result<usize, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAccountRepository;
    use chrono::Utc;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new("test-pepper")
    }

    fn stored_account(email: &str, password: &str) -> Account {
        Account::new(
            AccountId::new("acc1"),
            email.to_string(),
            hasher().hash(password).unwrap(),
            Utc::now(),
        )
    }

    fn echo_account(new_account: NewAccount) -> Account {
        Account::new(
            new_account.id,
            new_account.email,
            new_account.password_hash,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_register_success_hashes_password() {
        let mut mock_repo = MockAccountRepository::new();

        mock_repo
            .expect_create()
            .withf(|new_account| {
                new_account.email == "a@test.com"
                    && new_account.password_hash != "pw1"
                    && new_account.id.as_str().len() == ACCOUNT_ID_LENGTH
            })
            .times(1)
            .returning(|new_account| Ok(Some(echo_account(new_account))));

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        let account = service.register("a@test.com", "pw1").await.unwrap();

        assert_eq!(account.email, "a@test.com");
        assert!(hasher().verify("pw1", &account.password_hash));
    }

    #[tokio::test]
    async fn test_register_missing_email() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_create().times(0);

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        let result = service.register("", "pw1").await;

        assert!(matches!(
            result,
            Err(AppError::MissingField { field: "email" })
        ));
    }

    #[tokio::test]
    async fn test_register_missing_password() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_create().times(0);

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        let result = service.register("a@test.com", "").await;

        assert!(matches!(
            result,
            Err(AppError::MissingField { field: "password" })
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut mock_repo = MockAccountRepository::new();

        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::EmailAlreadyExists));

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        let result = service.register("a@test.com", "pw1").await;

        assert!(matches!(result, Err(AppError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_retries_on_id_collision() {
        let mut mock_repo = MockAccountRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_account| Ok(Some(echo_account(new_account))));

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        assert!(service.register("a@test.com", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn test_register_capacity_exhausted() {
        let mut mock_repo = MockAccountRepository::new();

        mock_repo.expect_create().times(3).returning(|_| Ok(None));

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 3);

        let result = service.register("a@test.com", "pw1").await;

        assert!(matches!(
            result,
            Err(AppError::CapacityExhausted { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_verify_success() {
        let mut mock_repo = MockAccountRepository::new();
        let account = stored_account("a@test.com", "pw1");

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "a@test.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        let verified = service.verify("a@test.com", "pw1").await.unwrap();

        assert_eq!(verified.id, AccountId::new("acc1"));
    }

    #[tokio::test]
    async fn test_verify_wrong_password_and_unknown_email_fail_identically() {
        let mut mock_repo = MockAccountRepository::new();
        let account = stored_account("a@test.com", "pw1");

        mock_repo
            .expect_find_by_email()
            .returning(move |email| {
                Ok((email == "a@test.com").then(|| account.clone()))
            });

        let service = CredentialService::new(Arc::new(mock_repo), hasher(), 10);

        let wrong_password = service.verify("a@test.com", "wrongpw").await.unwrap_err();
        let unknown_email = service.verify("nouser@test.com", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn test_unknown_account_hash_is_well_formed() {
        let (salt, mac) = UNKNOWN_ACCOUNT_HASH.split_once('$').unwrap();

        assert_eq!(hex::decode(salt).unwrap().len(), 16);
        assert_eq!(hex::decode(mac).unwrap().len(), 32);
        assert!(!hasher().verify("", UNKNOWN_ACCOUNT_HASH));
        assert!(!hasher().verify("pw1", UNKNOWN_ACCOUNT_HASH));
    }
}
