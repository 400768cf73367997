#![allow(dead_code)]

use axum_test::{TestResponse, TestServer};
use serde_json::json;
use std::sync::Arc;
use url_registry::api::routes::routes;
use url_registry::application::services::{AccessService, AccessSettings};
use url_registry::infrastructure::memory::{
    MemoryAccountRepository, MemoryLinkRepository, MemorySessionRepository,
};
use url_registry::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

pub fn create_test_state() -> AppState {
    let access = AccessService::new(
        Arc::new(MemoryAccountRepository::new()),
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(MemorySessionRepository::new()),
        AccessSettings::new("test-pepper"),
    );

    AppState::new(Arc::new(access), BASE_URL, false)
}

pub fn create_test_server() -> TestServer {
    TestServer::new(routes().with_state(create_test_state())).unwrap()
}

/// Extracts the value of `name` from the response's `Set-Cookie` header.
pub fn cookie_value(response: &TestResponse, name: &str) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

pub fn session_header(token: &str) -> String {
    format!("session_id={token}")
}

/// Registers an account and returns its session token.
pub async fn register(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/register")
        .json(&json!({ "email": email, "password": password }))
        .await;

    assert_eq!(response.status_code(), 201);

    cookie_value(&response, "session_id").unwrap()
}

/// Creates a link as the given session and returns its code.
pub async fn create_link(server: &TestServer, session: &str, destination: &str) -> String {
    let response = server
        .post("/urls")
        .add_header("Cookie", session_header(session))
        .json(&json!({ "destination": destination }))
        .await;

    assert_eq!(response.status_code(), 201);

    response.json::<serde_json::Value>()["code"]
        .as_str()
        .unwrap()
        .to_string()
}
