//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Domain
//! entities are never serialized directly so password hashes stay private.

pub mod auth;
pub mod health;
pub mod links;
