use std::sync::Arc;

use crate::application::services::AccessService;
use crate::infrastructure::memory::{
    MemoryAccountRepository, MemoryLinkRepository, MemorySessionRepository,
};

/// Access facade wired to the in-memory stores.
pub type Access =
    AccessService<MemoryAccountRepository, MemoryLinkRepository, MemorySessionRepository>;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub access: Arc<Access>,
    /// Public origin used to render short URLs, without a trailing slash.
    pub base_url: String,
    /// Adds the `Secure` attribute to issued cookies.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(access: Arc<Access>, base_url: impl Into<String>, cookie_secure: bool) -> Self {
        Self {
            access,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie_secure,
        }
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/u/{}", self.base_url, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::AccessSettings;

    fn access() -> Arc<Access> {
        Arc::new(AccessService::new(
            Arc::new(MemoryAccountRepository::new()),
            Arc::new(MemoryLinkRepository::new()),
            Arc::new(MemorySessionRepository::new()),
            AccessSettings::new("pepper"),
        ))
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let state = AppState::new(access(), "https://s.example.com/", false);

        assert_eq!(state.short_url("abc123"), "https://s.example.com/u/abc123");
    }
}
