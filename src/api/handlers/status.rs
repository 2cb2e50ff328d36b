//! Status endpoint and route fallback.

use axum::{http::Method, http::Uri, Json};

use crate::api::dto::status::StatusResponse;
use crate::error::AppError;

/// Returns a running-status message.
///
/// # Endpoint
///
/// `GET /`
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: format!("{} {} running", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    })
}

/// Fallback for unmatched routes: 404 naming the method and path.
pub async fn not_found_handler(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("Route not found: {method} {}", uri.path()))
}
