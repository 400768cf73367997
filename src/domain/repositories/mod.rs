//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the stores behind the services. Concrete in-memory
//! implementations live in `crate::infrastructure::memory`; a persistent
//! backend could be layered in later without changing these contracts.
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Registered accounts
//! - [`LinkRepository`] - Short links, ownership and visit history
//! - [`SessionRepository`] - Session token bindings
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod account_repository;
pub mod link_repository;
pub mod session_repository;

pub use account_repository::AccountRepository;
pub use link_repository::LinkRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
