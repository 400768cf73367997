//! In-memory repository implementations.
//!
//! Each store owns its state behind a `tokio::sync::RwLock`. State lives for
//! the lifetime of the process; nothing is persisted.
//!
//! # Repositories
//!
//! - [`MemoryAccountRepository`] - Accounts with an email index
//! - [`MemoryLinkRepository`] - Links, ownership and visit history
//! - [`MemorySessionRepository`] - Session token bindings

pub mod memory_account_repository;
pub mod memory_link_repository;
pub mod memory_session_repository;

pub use memory_account_repository::MemoryAccountRepository;
pub use memory_link_repository::MemoryLinkRepository;
pub use memory_session_repository::MemorySessionRepository;
