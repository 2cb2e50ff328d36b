//! Application error type and HTTP mapping.
//!
//! Every layer below the handlers returns `AppError`; the `IntoResponse`
//! impl is the single place errors are translated to status codes and
//! client-visible messages. Internal failures are logged with full detail
//! and the client only ever sees a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::geo::GeometryError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub enum AppError {
    /// Malformed or conflicting query parameters (400).
    Validation { message: String },
    /// Unknown entity or route (404).
    NotFound { message: String },
    /// Malformed import payload (422).
    Unprocessable { message: String },
    /// Store or geometry failure (500); detail is logged, never echoed.
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => {
                tracing::error!(detail = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal(format!("database error: {e}"))
    }
}

impl From<GeometryError> for AppError {
    fn from(e: GeometryError) -> Self {
        AppError::internal(format!("geometry error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::unprocessable(format!("Invalid import payload: {e}"))
    }
}
