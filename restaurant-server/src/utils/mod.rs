//! Utility module
//!
//! - [`QueryBuilder`] - parameterized WHERE clause builder
//! - logging setup

pub mod logger;
pub mod query_builder;

pub use query_builder::{QueryBuilder, QueryValue};
