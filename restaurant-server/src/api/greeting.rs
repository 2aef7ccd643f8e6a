//! Liveness messages for the front end

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(index))
        .route("/api/hello", get(hello))
}

/// GET /
async fn index() -> Json<Message> {
    Json(Message {
        message: "Restaurant server start!",
    })
}

/// GET /api/hello
async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello World",
    })
}
