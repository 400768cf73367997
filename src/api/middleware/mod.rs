//! HTTP middleware and request extractors.
//!
//! Provides cookie-based session and visitor identification plus request
//! tracing.

pub mod session;
pub mod tracing;
