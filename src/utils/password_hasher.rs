//! Salted password hashing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of the per-password random salt in bytes.
const SALT_LENGTH: usize = 16;

/// Hashes and verifies passwords with HMAC-SHA256.
///
/// The MAC is keyed by a server-side pepper and computed over a fresh random
/// salt followed by the password. Stored values have the form
/// `hex(salt)$hex(mac)`, so the plaintext is never kept and a leaked store
/// cannot be checked against guesses without the pepper.
#[derive(Clone)]
pub struct PasswordHasher {
    pepper: String,
}

impl PasswordHasher {
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Hashes `password` with a newly generated salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the system random number generator fails.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LENGTH];
        getrandom::fill(&mut salt)
            .map_err(|e| AppError::internal(format!("Failed to generate salt: {e}")))?;

        let digest = self.mac(&salt, password)?.finalize().into_bytes();

        Ok(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Checks `password` against a value produced by [`Self::hash`].
    ///
    /// Malformed stored values never match. The final comparison is
    /// constant-time.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
            return false;
        };

        let (Ok(salt), Ok(digest)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };

        match self.mac(&salt, password) {
            Ok(mac) => mac.verify_slice(&digest).is_ok(),
            Err(_) => false,
        }
    }

    fn mac(&self, salt: &[u8], password: &str) -> Result<HmacSha256, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.pepper.as_bytes())
            .map_err(|_| AppError::internal("Invalid password pepper"))?;
        mac.update(salt);
        mac.update(password.as_bytes());
        Ok(mac)
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
