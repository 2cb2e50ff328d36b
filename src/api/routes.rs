//! API route configuration.

use crate::api::handlers::{find_city_handler, import_handler, status_handler};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET  /`         - Running-status message
/// - `POST /import`   - Bulk GeoJSON point-feature import
/// - `GET  /id/{id}`  - City lookup, radius query with `?dist=N`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status_handler))
        .route("/import", post(import_handler))
        .route("/id/{id}", get(find_city_handler))
}
