use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Phone not found")]
    NotFound,

    #[error("Invalid order key")]
    InvalidOrder,

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// Convert AppError to an HTTP response. The client reads error bodies as
// plain text, so the payload stays text and the kind maps to a status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidOrder => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into()),
        };

        tracing::error!(?self);
        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
