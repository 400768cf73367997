//! Business logic services for the application layer.

pub mod access_service;
pub mod credential_service;
pub mod link_service;
pub mod session_service;
pub mod visit_service;

pub use access_service::{AccessService, AccessSettings, Authenticated, RegistryStats};
pub use credential_service::CredentialService;
pub use link_service::LinkService;
pub use session_service::SessionService;
pub use visit_service::VisitService;
