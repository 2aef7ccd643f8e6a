//! Core module: configuration, state, errors and the HTTP server
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared handler state
//! - [`Server`] - HTTP server
//! - [`ServerError`] - handler and startup errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, CorsOrigins};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
