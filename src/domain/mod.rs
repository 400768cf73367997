//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Redirect Flow
//!
//! 1. HTTP handler resolves the visitor token (issuing one on first contact)
//! 2. [`crate::application::services::VisitService`] records the visit
//! 3. [`repositories::LinkRepository::record_visit`] appends the
//!    [`entities::Visit`] and updates counters atomically
//! 4. The handler redirects to the returned destination

pub mod entities;
pub mod repositories;
