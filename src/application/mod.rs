//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations the HTTP
//! layer needs. Only [`services::AccessService`] is meant to be called from
//! handlers; it resolves sessions and composes the others.
//!
//! # Available Services
//!
//! - [`services::credential_service::CredentialService`] - Registration and password checks
//! - [`services::session_service::SessionService`] - Session tokens
//! - [`services::link_service::LinkService`] - Short link registry
//! - [`services::visit_service::VisitService`] - Redirect tracking
//! - [`services::access_service::AccessService`] - Facade over all of the above

pub mod services;
