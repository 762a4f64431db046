//! Error types for the herodex server
//!
//! Every error is recovered at the handler boundary and rendered as a JSON
//! body with a 4xx status; database faults are logged and surfaced as 500.
//! The wire shapes are part of the API contract: lookups report
//! `{"error": "..."}`, write validation reports `{"errors": [...]}`, and a
//! rejected insert reports `{"errors": "<details>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Hero not found")]
    HeroNotFound,

    #[error("Power not found")]
    PowerNotFound,

    /// A hero-power link referenced a hero or power that does not exist.
    #[error("Hero or Power not found")]
    LinkTargetNotFound,

    #[error("Description is required")]
    DescriptionRequired,

    #[error("Missing required fields")]
    MissingFields,

    /// Semantically invalid input (bad strength value, short description).
    #[error("validation errors")]
    Validation,

    /// The store rejected a write with a constraint violation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::HeroNotFound => {
                (StatusCode::NOT_FOUND, json!({"error": "Hero not found"}))
            }
            ServerError::PowerNotFound => {
                (StatusCode::NOT_FOUND, json!({"error": "Power not found"}))
            }
            ServerError::LinkTargetNotFound => (
                StatusCode::NOT_FOUND,
                json!({"errors": ["Hero or Power not found"]}),
            ),
            ServerError::DescriptionRequired => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Description is required"}),
            ),
            ServerError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({"errors": ["Missing required fields"]}),
            ),
            ServerError::Validation => (
                StatusCode::BAD_REQUEST,
                json!({"errors": ["validation errors"]}),
            ),
            ServerError::Constraint(details) => {
                (StatusCode::BAD_REQUEST, json!({"errors": details}))
            }
            ServerError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "internal server error"}),
                )
            }
            ServerError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
