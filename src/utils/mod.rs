//! Utility functions for identifier generation and password hashing.
//!
//! - [`code_generator`] - Short codes, account ids, visitor and session tokens
//! - [`password_hasher`] - Salted password hashing and verification

pub mod code_generator;
pub mod password_hasher;
