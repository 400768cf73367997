//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `PASSWORD_PEPPER` - HMAC key mixed into every password hash
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Public origin for rendered short URLs (default: `http://localhost:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHORT_CODE_LENGTH` - Generated code length (default: 6, range: 4-32)
//! - `VISITOR_TOKEN_LENGTH` - Visitor cookie token length (default: 36, range: 16-128)
//! - `CODE_MAX_ATTEMPTS` - Retries on identifier collision (default: 10, range: 1-100)
//! - `COOKIE_SECURE` - Mark cookies `Secure` (default: `false`)

use anyhow::{Context, Result};
use std::env;

use crate::application::services::AccessSettings;
use crate::application::services::access_service::DEFAULT_MAX_CODE_ATTEMPTS;
use crate::utils::code_generator::{SHORT_CODE_LENGTH, VISITOR_TOKEN_LENGTH};

/// Service configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Loaded from `PASSWORD_PEPPER`. Must be non-empty.
    pub password_pepper: String,
    pub short_code_length: usize,
    pub visitor_token_length: usize,
    pub code_max_attempts: usize,
    pub cookie_secure: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PASSWORD_PEPPER` is missing or a numeric
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let password_pepper =
            env::var("PASSWORD_PEPPER").context("PASSWORD_PEPPER must be set")?;

        let short_code_length = parse_var("SHORT_CODE_LENGTH", SHORT_CODE_LENGTH)?;
        let visitor_token_length = parse_var("VISITOR_TOKEN_LENGTH", VISITOR_TOKEN_LENGTH)?;
        let code_max_attempts = parse_var("CODE_MAX_ATTEMPTS", DEFAULT_MAX_CODE_ATTEMPTS)?;

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            password_pepper,
            short_code_length,
            visitor_token_length,
            code_max_attempts,
            cookie_secure,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an http(s) origin
    /// - `password_pepper` is empty
    /// - a length or attempt limit is out of range
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.password_pepper.is_empty() {
            anyhow::bail!("PASSWORD_PEPPER must not be empty");
        }

        if !(4..=32).contains(&self.short_code_length) {
            anyhow::bail!(
                "SHORT_CODE_LENGTH must be between 4 and 32, got {}",
                self.short_code_length
            );
        }

        if !(16..=128).contains(&self.visitor_token_length) {
            anyhow::bail!(
                "VISITOR_TOKEN_LENGTH must be between 16 and 128, got {}",
                self.visitor_token_length
            );
        }

        if !(1..=100).contains(&self.code_max_attempts) {
            anyhow::bail!(
                "CODE_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.code_max_attempts
            );
        }

        Ok(())
    }

    /// Builds the access facade settings.
    pub fn access_settings(&self) -> AccessSettings {
        AccessSettings {
            password_pepper: self.password_pepper.clone(),
            short_code_length: self.short_code_length,
            visitor_token_length: self.visitor_token_length,
            max_code_attempts: self.code_max_attempts,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Password pepper: {}", mask_secret(&self.password_pepper));
        tracing::info!("  Short code length: {}", self.short_code_length);
        tracing::info!("  Visitor token length: {}", self.visitor_token_length);
        tracing::info!("  Code attempts: {}", self.code_max_attempts);
        tracing::info!("  Secure cookies: {}", self.cookie_secure);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listen_addr", &self.listen_addr)
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("password_pepper", &mask_secret(&self.password_pepper))
            .field("short_code_length", &self.short_code_length)
            .field("visitor_token_length", &self.visitor_token_length)
            .field("code_max_attempts", &self.code_max_attempts)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

/// Parses a numeric variable, falling back to `default` when unset.
fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a positive integer, got '{value}'")),
        Err(_) => Ok(default),
    }
}

/// Masks a secret for logging, keeping only its length visible.
///
/// - `""` → `(empty)`
/// - `"s3cret"` → `*** (6 chars)`
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "(empty)".to_string()
    } else {
        format!("*** ({} chars)", secret.chars().count())
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
