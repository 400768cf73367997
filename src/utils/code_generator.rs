//! Random identifier generation.
//!
//! Short codes, account ids and visitor tokens are drawn uniformly from the
//! 62-character alphanumeric alphabet using the thread-local `rand` RNG.
//! This resists casual guessing only and is not a hardened token generator:
//! a production deployment that relies on codes being unguessable should
//! draw them from a cryptographically secure source. Session tokens grant
//! access and are already built from OS entropy.

use crate::error::AppError;
use base64::Engine as _;
use rand::{Rng, distr::Alphanumeric};

/// Default length of a short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Length of a generated account id.
pub const ACCOUNT_ID_LENGTH: usize = 12;

/// Default length of a visitor token.
pub const VISITOR_TOKEN_LENGTH: usize = 36;

/// Length of random bytes before base64 encoding of a session token.
const SESSION_TOKEN_BYTES: usize = 32;

/// Generates a random code of `length` characters from `[A-Za-z0-9]`.
///
/// No uniqueness guarantee is made; callers must check for collisions with
/// existing keys and regenerate.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Generates an opaque session token.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 43-character token that is safe in cookies.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn generate_session_token() -> Result<String, AppError> {
    let mut buffer = [0u8; SESSION_TOKEN_BYTES];

    getrandom::fill(&mut buffer)
        .map_err(|e| AppError::internal(format!("Failed to generate random bytes: {e}")))?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
