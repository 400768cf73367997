//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into calls on the access facade and
//! formats responses as JSON.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Cookie extractors and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
