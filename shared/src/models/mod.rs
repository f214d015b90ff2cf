//! Data models
//!
//! Shared between the sync engine and anything talking to the employee API.

pub mod draft;
pub mod employee;

// Re-exports
pub use draft::*;
pub use employee::*;
