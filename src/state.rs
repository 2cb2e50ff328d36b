//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::CityService;

/// Handler-visible state.
///
/// Handlers are stateless and reentrant; the only long-lived state they
/// share is the service (and through it the store handle), so cloning is a
/// cheap `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    pub city_service: Arc<CityService>,
}

impl AppState {
    pub fn new(city_service: Arc<CityService>) -> Self {
        Self { city_service }
    }
}
