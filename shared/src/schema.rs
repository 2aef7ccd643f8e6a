//! Restaurant table schema
//!
//! `RESTAURANT_COLUMNS` is the one ordered list of data columns. Table
//! creation, positional insertion and row mapping are all derived from it,
//! so the column order lives in exactly one place.

pub use crate::models::restaurant::RESTAURANT_COLUMNS;

/// Name of the single table holding restaurant records
pub const TABLE_NAME: &str = "restaurants";

/// Number of data columns (everything except `id`)
pub const DATA_COLUMN_COUNT: usize = 29;

/// Width of a stored row: `id` followed by the data columns
pub const ROW_WIDTH: usize = DATA_COLUMN_COUNT + 1;

/// Declared storage class of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
}

impl ColumnKind {
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }
}

/// A data column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Look up a data column by name
pub fn column(name: &str) -> Option<&'static Column> {
    RESTAURANT_COLUMNS.iter().find(|c| c.name == name)
}

/// Position of a data column inside a stored row (`id` is position 0)
pub fn row_position(name: &str) -> Option<usize> {
    RESTAURANT_COLUMNS
        .iter()
        .position(|c| c.name == name)
        .map(|i| i + 1)
}

pub fn drop_table_sql() -> String {
    format!("DROP TABLE IF EXISTS {TABLE_NAME}")
}

pub fn create_table_sql() -> String {
    let columns: Vec<String> = RESTAURANT_COLUMNS
        .iter()
        .map(|c| format!("    {} {}", c.name, c.kind.sql_type()))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n{}\n)",
        columns.join(",\n")
    )
}

/// Positional insert into all data columns
pub fn insert_sql() -> String {
    let names: Vec<&str> = RESTAURANT_COLUMNS.iter().map(|c| c.name).collect();
    let placeholders = vec!["?"; DATA_COLUMN_COUNT];
    format!(
        "INSERT INTO {TABLE_NAME} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Full-row select in mapping order (`id` first)
pub fn select_sql() -> String {
    let names: Vec<&str> = RESTAURANT_COLUMNS.iter().map(|c| c.name).collect();
    format!("SELECT id, {} FROM {TABLE_NAME}", names.join(", "))
}
