//! Positional cell values
//!
//! A stored row is a sequence of SQLite values whose storage class may not
//! match the declared column type (the importer writes spreadsheet text
//! into numeric columns as-is). `Cell` keeps the value as stored;
//! [`FromCell`] turns it into the typed field of a [`crate::Restaurant`].

use serde::{Deserialize, Serialize};

/// One value of a stored row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    /// Empty text cell, used to pad short source rows
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Integer view of the cell; text is trimmed and parsed
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Text view of the cell; NULL renders as an empty string
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Integer(i) => i.to_string(),
            Self::Real(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Value of a numeric column, in the storage class it was stored with
///
/// SQLite keeps spreadsheet text such as `""` or `"100名"` in an INTEGER
/// or REAL column as text. It is served back unchanged: a JSON number for
/// numeric storage, a JSON string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Numeric {
    /// Integer view; text is trimmed and parsed
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Real(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Self::Real(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Float view; text is trimmed and parsed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Real(f) => Some(*f),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Conversion from a stored cell into a typed model field
pub trait FromCell: Sized {
    fn from_cell(cell: &Cell) -> Self;
}

impl FromCell for String {
    fn from_cell(cell: &Cell) -> Self {
        cell.to_text()
    }
}

impl FromCell for Option<Numeric> {
    fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Null => None,
            Cell::Integer(i) => Some(Numeric::Integer(*i)),
            Cell::Real(f) => Some(Numeric::Real(*f)),
            Cell::Text(s) => Some(Numeric::Text(s.clone())),
        }
    }
}

/// Conversion from a typed model field back into a cell
pub trait ToCell {
    fn to_cell(&self) -> Cell;
}

impl ToCell for String {
    fn to_cell(&self) -> Cell {
        Cell::Text(self.clone())
    }
}

impl ToCell for Option<Numeric> {
    fn to_cell(&self) -> Cell {
        match self {
            None => Cell::Null,
            Some(Numeric::Integer(i)) => Cell::Integer(*i),
            Some(Numeric::Real(f)) => Cell::Real(*f),
            Some(Numeric::Text(s)) => Cell::Text(s.clone()),
        }
    }
}

#[cfg(feature = "db")]
mod sqlite {
    use super::Cell;
    use sqlx::sqlite::SqliteRow;
    use sqlx::{Row, TypeInfo, ValueRef};

    impl Cell {
        /// Read every column of a row by position, keeping storage classes
        pub fn read_row(row: &SqliteRow) -> Result<Vec<Cell>, sqlx::Error> {
            (0..row.len()).map(|i| Self::read_column(row, i)).collect()
        }

        /// Read one column by position
        pub fn read_column(row: &SqliteRow, index: usize) -> Result<Cell, sqlx::Error> {
            let storage = {
                let raw = row.try_get_raw(index)?;
                if raw.is_null() {
                    return Ok(Cell::Null);
                }
                raw.type_info().name().to_string()
            };

            let cell = match storage.as_str() {
                "INTEGER" | "BOOLEAN" => Cell::Integer(row.try_get(index)?),
                "REAL" | "NUMERIC" => Cell::Real(row.try_get(index)?),
                "TEXT" => Cell::Text(row.try_get(index)?),
                _ => {
                    let bytes: Vec<u8> = row.try_get(index)?;
                    Cell::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
            };
            Ok(cell)
        }
    }
}
