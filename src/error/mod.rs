//! Application error types and their single translation to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown username or wrong password. The two are never distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, badly signed, or expired bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Username already exists")]
    DuplicateUsername,

    /// Token was valid but the account behind it is gone.
    #[error("User not found")]
    NotFound,

    /// Stored password hash does not decode to salt || key.
    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::DuplicateUsername | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MalformedHash
            | AppError::Config(_)
            | AppError::Db(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::MalformedHash => {
                tracing::error!("stored password hash failed integrity check");
                "Internal server error".to_string()
            }
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
