//! # URL Registry
//!
//! An in-memory URL shortener with per-account ownership and visit
//! analytics, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Business logic and the access facade
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory stores
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and cookie extractors
//!
//! ## Features
//!
//! - Email/password accounts with salted, peppered password hashes
//! - Cookie sessions
//! - Random short codes owned by the account that created them
//! - Public redirects counting total visits and unique visitors
//!
//! ## Quick Start
//!
//! ```bash
//! export PASSWORD_PEPPER="change-me"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AccessService, AccessSettings, Authenticated};
    pub use crate::domain::entities::{Account, AccountId, Link, LinkDetails, Visit};
    pub use crate::error::AppError;
    pub use crate::state::{Access, AppState};
}
