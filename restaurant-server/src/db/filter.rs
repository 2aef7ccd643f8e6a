//! Listing filter
//!
//! Every criterion is optional. Parsing never fails: an empty string or an
//! integer that does not parse means the criterion was not supplied, and
//! its clause is left out of the query.

use crate::utils::QueryBuilder;

/// Optional criteria of `GET /result`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    /// Exact match on `area`
    pub area: Option<String>,
    /// `capacity >= guests`
    pub guests: Option<i64>,
    /// `category` contains the value
    pub genre: Option<String>,
    /// `budget_min >= budget_min`
    pub budget_min: Option<i64>,
    /// `budget_max <= budget_max`
    pub budget_max: Option<i64>,
    /// Exact match on `has_private_room`
    pub private_room: Option<String>,
    /// Exact match on `has_drink_all_included`
    pub drink_included: Option<String>,
}

impl RestaurantFilter {
    /// Build from raw query pairs; the first occurrence of a key wins
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        let mut seen: Vec<String> = Vec::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if seen.iter().any(|k| k == key) {
                continue;
            }
            seen.push(key.to_string());

            match key {
                "area" => filter.area = parse_text(value),
                "guests" => filter.guests = parse_int(value),
                "genre" => filter.genre = parse_text(value),
                "budgetMin" => filter.budget_min = parse_int(value),
                "budgetMax" => filter.budget_max = parse_int(value),
                "privateRoom" => filter.private_room = parse_text(value),
                "drinkIncluded" => filter.drink_included = parse_text(value),
                _ => {}
            }
        }

        filter
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Conjoin one clause per present criterion, in a fixed order
    pub fn to_query(&self) -> QueryBuilder {
        let mut builder = QueryBuilder::new();

        if let Some(area) = &self.area {
            builder.add_eq("area", area);
        }
        if let Some(guests) = self.guests {
            builder.add_min("capacity", guests);
        }
        if let Some(genre) = &self.genre {
            builder.add_contains("category", genre);
        }
        if let Some(budget_min) = self.budget_min {
            builder.add_min("budget_min", budget_min);
        }
        if let Some(budget_max) = self.budget_max {
            builder.add_max("budget_max", budget_max);
        }
        if let Some(private_room) = &self.private_room {
            builder.add_eq("has_private_room", private_room);
        }
        if let Some(drink_included) = &self.drink_included {
            builder.add_eq("has_drink_all_included", drink_included);
        }

        builder
    }
}

fn parse_text(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}
