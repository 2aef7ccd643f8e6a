//! Restaurant Model
//!
//! The struct, the column schema and the positional mapping are generated
//! from one field list, so adding or reordering a column changes all three
//! together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::{Cell, FromCell, Numeric, ToCell};
use crate::schema::{Column, ColumnKind, DATA_COLUMN_COUNT, ROW_WIDTH};

/// Row mapping failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has {actual} positions, expected at least {expected}")]
    TooShort { expected: usize, actual: usize },

    #[error("row id is not an integer")]
    InvalidId,
}

macro_rules! field_type {
    (Text) => { String };
    (Integer) => { Option<Numeric> };
    (Real) => { Option<Numeric> };
}

macro_rules! restaurant_columns {
    ($( $(#[$meta:meta])* $field:ident: $kind:ident ),+ $(,)?) => {
        /// Data columns in stored order (`id` excluded)
        pub const RESTAURANT_COLUMNS: [Column; DATA_COLUMN_COUNT] = [
            $( Column { name: stringify!($field), kind: ColumnKind::$kind } ),+
        ];

        /// Restaurant record as served by the API
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct Restaurant {
            pub id: i64,
            $( $(#[$meta])* pub $field: field_type!($kind), )+
        }

        impl Restaurant {
            /// Map a stored row (`id` followed by the data columns) by position.
            ///
            /// Extra trailing positions are ignored; a row shorter than
            /// [`ROW_WIDTH`] is rejected.
            pub fn from_row(row: &[Cell]) -> Result<Self, RowError> {
                let [id, $($field,)+ ..] = row else {
                    return Err(RowError::TooShort {
                        expected: ROW_WIDTH,
                        actual: row.len(),
                    });
                };
                let id = id.as_i64().ok_or(RowError::InvalidId)?;
                Ok(Self {
                    id,
                    $( $field: FromCell::from_cell($field), )+
                })
            }

            /// The data columns of this record in insertion order
            pub fn to_row(&self) -> Vec<Cell> {
                vec![$( ToCell::to_cell(&self.$field) ),+]
            }
        }
    };
}

restaurant_columns! {
    name: Text,
    address: Text,
    phone_number: Text,
    /// Tabelog score; whatever the sheet held when it is not a number
    tabelog_rating: Real,
    tabelog_review_count: Integer,
    tabelog_link: Text,
    google_rating: Real,
    google_review_count: Integer,
    google_link: Text,
    opening_hours: Text,
    course: Text,
    menu: Text,
    drink_menu: Text,
    store_top_image: Text,
    description: Text,
    longitude: Real,
    latitude: Real,
    area: Text,
    nearest_station: Text,
    directions: Text,
    /// Maximum party size
    capacity: Integer,
    /// Genre; may hold several comma-separated genres
    category: Text,
    budget_min: Integer,
    budget_max: Integer,
    has_private_room: Text,
    has_drink_all_included: Text,
    detail_image1: Text,
    detail_image2: Text,
    detail_image3: Text,
}

/// Food and drink menus of one restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDetails {
    pub food_menu: String,
    pub drink_menu: String,
}

impl MenuDetails {
    /// Map a `(menu, drink_menu)` row
    pub fn from_row(row: &[Cell]) -> Result<Self, RowError> {
        let [menu, drink_menu, ..] = row else {
            return Err(RowError::TooShort {
                expected: 2,
                actual: row.len(),
            });
        };
        Ok(Self {
            food_menu: menu.to_text(),
            drink_menu: drink_menu.to_text(),
        })
    }
}
