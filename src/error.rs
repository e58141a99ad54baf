use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Required fields missing")]
    MissingFields,

    #[error("User already exists. Please try a different email.")]
    UserExists,

    #[error("User not found.")]
    UserNotFound,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("database error: {0}")]
    Database(#[from] redis::RedisError),

    #[error("password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("user record error: {0}")]
    Record(#[from] serde_json::Error),

    #[error("blocking task error: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyInput | AppError::MissingFields | AppError::UserExists => {
                StatusCode::BAD_REQUEST
            }
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::IncorrectPassword => StatusCode::UNAUTHORIZED,
            AppError::Database(_)
            | AppError::Hash(_)
            | AppError::Record(_)
            | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged in full but never leaked to the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{self}");
            "Internal server error.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
