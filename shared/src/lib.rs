//! Shared types for the restaurant backend
//!
//! The restaurant model, its positional column schema and the row
//! mapping used by both the API server and the import job.

pub mod cell;
pub mod models;
pub mod schema;

// Re-exports
pub use cell::{Cell, Numeric};
pub use models::{MenuDetails, Restaurant, RowError};
pub use schema::{Column, ColumnKind, DATA_COLUMN_COUNT, RESTAURANT_COLUMNS, ROW_WIDTH, TABLE_NAME};
pub use serde::{Deserialize, Serialize};
