//! Infrastructure layer implementing the domain store contracts.
//!
//! # Modules
//!
//! - [`memory`] - In-process repository implementations

pub mod memory;
