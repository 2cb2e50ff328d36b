//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`        - Running-status message
//! - `POST /import`  - Bulk GeoJSON point-feature import
//! - `GET  /id/{id}` - City lookup, radius query with `?dist=N`
//! - anything else   - JSON 404 naming the method and path
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Path normalization** - trailing slash handling

use crate::api;
use crate::api::handlers::not_found_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::api_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
