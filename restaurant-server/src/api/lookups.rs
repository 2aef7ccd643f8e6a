//! Distinct values used to populate search dropdowns

use axum::{Json, Router, extract::State, routing::get};

use crate::core::{Result, ServerState};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/areas", get(areas))
        .route("/api/genres", get(genres))
}

/// GET /api/areas - distinct `area` values
async fn areas(State(state): State<ServerState>) -> Result<Json<Vec<String>>> {
    let areas = state.store.distinct_areas().await?;
    Ok(Json(areas))
}

/// GET /api/genres - distinct `category` values
async fn genres(State(state): State<ServerState>) -> Result<Json<Vec<String>>> {
    let genres = state.store.distinct_genres().await?;
    Ok(Json(genres))
}
