//! HTTP API
//!
//! Every route is public and read-only. Each submodule exposes a
//! `router()` merged by [`crate::routes::build_router`].

pub mod greeting;
pub mod health;
pub mod lookups;
pub mod restaurants;
