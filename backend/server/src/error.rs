use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use book::BookError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Book error: {0}")]
    Book(#[from] BookError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidPosition { .. } => StatusCode::BAD_REQUEST,
            AppError::Book { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
