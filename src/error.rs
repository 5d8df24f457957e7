//! Application error type
//!
//! Every handler returns `Result<_, AppError>`. Errors are rendered as a JSON
//! body `{"error": ..., "code": ...}` carrying the raw message, with a status
//! code chosen per variant.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Multipart(err) => err.status(),
            AppError::Database(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Hashing(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request",
            AppError::Unauthorized => "unauthorized",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::NotFound(_) => "not_found",
            AppError::Database(_) => "database_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Io(_) => "storage_error",
            AppError::Multipart(_) => "upload_error",
            AppError::Hashing(_) => "hashing_error",
            AppError::Config(_) => "config_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = match &self {
            AppError::Unauthorized => json!({
                "error": "Unauthorized",
                "message": "Invalid or missing authorization header",
                "code": self.code(),
            }),
            _ => json!({
                "error": self.to_string(),
                "code": self.code(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

// redb splits its failures across several types; fold them into redb::Error.
macro_rules! from_redb {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AppError {
                fn from(err: $ty) -> Self {
                    AppError::Database(err.into())
                }
            }
        )*
    };
}

from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError
);

pub type AppResult<T> = Result<T, AppError>;
