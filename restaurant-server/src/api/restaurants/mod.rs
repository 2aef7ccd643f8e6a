//! Restaurant API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/result", get(handler::list))
        .route("/restaurant/{id}", get(handler::get_by_id))
        .route("/restaurant/{id}/menu", get(handler::get_menu))
}
