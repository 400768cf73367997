//! Cookie-based caller identification.
//!
//! Two cookies are used:
//!
//! - `session_id` - opaque session token issued on register/login
//! - `visitor_id` - long-lived anonymous token issued on first redirect
//!
//! Extraction never fails: a missing cookie simply yields `None` and the
//! access facade decides what an anonymous caller may do.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::COOKIE, request::Parts},
};
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "session_id";
pub const VISITOR_COOKIE: &str = "visitor_id";

/// One year, in seconds.
const VISITOR_COOKIE_MAX_AGE: u64 = 365 * 24 * 60 * 60;

/// Finds a cookie value in the `Cookie` request headers.
///
/// Handles several cookies per header and several `Cookie` headers. Empty
/// values are treated as absent.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Session token taken from the `session_id` cookie, if present.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_cookie(&parts.headers, SESSION_COOKIE)))
    }
}

/// Visitor token taken from the `visitor_id` cookie, if present.
#[derive(Debug, Clone, Default)]
pub struct VisitorToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for VisitorToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_cookie(&parts.headers, VISITOR_COOKIE)))
    }
}

/// `Set-Cookie` value binding the browser to a session.
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax{}",
        secure_attr(secure)
    )
}

/// `Set-Cookie` value removing the session cookie.
pub fn clear_session_cookie(secure: bool) -> String {
    format!(
        "{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0{}",
        secure_attr(secure)
    )
}

/// `Set-Cookie` value persisting a visitor token for a year.
pub fn visitor_cookie(visitor_id: &str, secure: bool) -> String {
    format!(
        "{VISITOR_COOKIE}={visitor_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={VISITOR_COOKIE_MAX_AGE}{}",
        secure_attr(secure)
    )
}

fn secure_attr(secure: bool) -> &'static str {
    if secure { "; Secure" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookies: &[&'static str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_static(cookie));
        }
        headers
    }

    #[test]
    fn test_read_cookie_among_others() {
        let headers = headers(&["theme=dark; session_id=tok123; visitor_id=v1"]);

        assert_eq!(
            read_cookie(&headers, SESSION_COOKIE),
            Some("tok123".to_string())
        );
        assert_eq!(read_cookie(&headers, VISITOR_COOKIE), Some("v1".to_string()));
    }

    #[test]
    fn test_read_cookie_across_headers() {
        let headers = headers(&["theme=dark", "visitor_id=v2"]);

        assert_eq!(read_cookie(&headers, VISITOR_COOKIE), Some("v2".to_string()));
    }

    #[test]
    fn test_read_cookie_missing_or_empty() {
        assert_eq!(read_cookie(&HeaderMap::new(), SESSION_COOKIE), None);
        assert_eq!(read_cookie(&headers(&["session_id="]), SESSION_COOKIE), None);
        assert_eq!(
            read_cookie(&headers(&["my_session_id=x"]), SESSION_COOKIE),
            None
        );
    }

    #[test]
    fn test_cookie_attributes() {
        assert_eq!(
            session_cookie("tok", false),
            "session_id=tok; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(session_cookie("tok", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
        assert!(visitor_cookie("v1", false).contains("Max-Age=31536000"));
    }
}
