//! Restaurant Server - restaurant search backend over SQLite
//!
//! # Module layout
//!
//! ```text
//! restaurant-server/src/
//! ├── core/      # configuration, state, errors, HTTP server
//! ├── db/        # record store, filter criteria, repository statements
//! ├── api/       # HTTP routes and handlers
//! ├── routes/    # router assembly and middleware
//! ├── import/    # Import Job and its tabular sources
//! └── utils/     # logging, SQL query builder
//! ```
//!
//! Restaurant rows are positional: the ordered column list in
//! [`shared::RESTAURANT_COLUMNS`] drives table creation, insertion and
//! every response mapping.

pub mod api;
pub mod core;
pub mod db;
pub mod import;
pub mod routes;
pub mod utils;

pub use core::{Config, Server, ServerError, ServerState};
pub use db::{RestaurantFilter, Store};
pub use import::{ImportConfig, ImportError, ImportSummary, run_import};
pub use routes::build_app;
pub use utils::logger::init_logger_with_file;
