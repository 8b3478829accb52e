//! Error types for the ExpatOS server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dependency_engine::EngineError;
use serde::Serialize;
use shared_types::DocumentError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] DocumentError),

    #[error("Duplicate document: {0}")]
    DuplicateDocument(#[from] EngineError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::InvalidDocument(err) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.to_string())
            }
            ServerError::DuplicateDocument(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DUPLICATE_DOCUMENT",
                err.to_string(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
