//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; the small amount of logic they carry
//! (ownership comparison, visit counting) is pure and lock-free. Atomicity is
//! the job of the stores in `crate::infrastructure`.
//!
//! # Entity Types
//!
//! - [`Account`] - A registered user, keyed by [`AccountId`]
//! - [`Link`] - A short code mapping owned by an account
//! - [`Visit`] - A single redirect through a short code
//! - [`Session`] - A token bound to an account
//!
//! `NewAccount` and `NewLink` carry the data needed to create records.

pub mod account;
pub mod link;
pub mod session;
pub mod visit;

pub use account::{Account, AccountId, NewAccount};
pub use link::{Link, LinkDetails, NewLink};
pub use session::Session;
pub use visit::Visit;
