//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::{MenuDetails, Restaurant};

use crate::core::{Result, ServerError, ServerState};
use crate::db::RestaurantFilter;

/// GET /result - restaurants matching the optional query filters
///
/// Unknown keys and unparsable values are ignored, so this never rejects
/// a query string.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Restaurant>>> {
    let filter = RestaurantFilter::from_pairs(params);
    let restaurants = state.store.query_by_filter(&filter).await?;
    tracing::debug!(count = restaurants.len(), filtered = !filter.is_empty(), "Listed restaurants");
    Ok(Json(restaurants))
}

/// GET /restaurant/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>> {
    let not_found = || ServerError::not_found("Restaurant not found");
    let id = parse_id(&id).ok_or_else(not_found)?;
    let restaurant = state.store.query_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(restaurant))
}

/// GET /restaurant/{id}/menu
pub async fn get_menu(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MenuDetails>> {
    let not_found = || ServerError::not_found("Menu not found");
    let id = parse_id(&id).ok_or_else(not_found)?;
    let menu = state.store.find_menu(id).await?.ok_or_else(not_found)?;
    Ok(Json(menu))
}

/// Path ids are non-negative integers; anything else matches no row
fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
