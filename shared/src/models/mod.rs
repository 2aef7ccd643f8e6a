//! Data models
//!
//! Shared between the API server and the import job.

pub mod restaurant;

// Re-exports
pub use restaurant::*;
