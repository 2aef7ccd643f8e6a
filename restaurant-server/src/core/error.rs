use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::RowError;

use crate::db::RepoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Requested id has no row; the message is shown to the client
    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("row mapping error: {0}")]
    Mapping(#[from] RowError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for ServerError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => Self::Database(e),
            RepoError::Mapping(e) => Self::Mapping(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl ServerError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
            }
            // Store failures surface as a bare 500, the cause only goes to the log
            other => {
                tracing::error!(error = %other, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Handler Result alias
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ServerError::not_found("Restaurant not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Restaurant not found"}));
    }

    #[tokio::test]
    async fn test_internal_error_has_no_payload() {
        let response = ServerError::from(RowError::InvalidId).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn test_repo_error_conversion() {
        assert!(matches!(
            ServerError::from(RepoError::Mapping(RowError::InvalidId)),
            ServerError::Mapping(RowError::InvalidId)
        ));
        assert!(matches!(
            ServerError::from(RepoError::UnknownColumn("nope")),
            ServerError::Internal(_)
        ));
    }
}
