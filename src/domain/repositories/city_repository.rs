//! Repository trait for city data access.

use crate::domain::entities::{City, NewCity};
use crate::domain::geo::PolygonRing;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the city store.
///
/// The store owns the connection pool and the spatial index; this trait is
/// the whole surface the core sees. Implementations must be thread-safe:
/// handlers are stateless and call into a shared handle concurrently.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCityRepository`] - PostgreSQL backend
/// - [`crate::infrastructure::persistence::MemoryCityRepository`] - embedded R-tree backend
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// Finds a city by its external identifier.
    ///
    /// The identifier is accepted as an opaque string; an identifier that
    /// matches nothing is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    async fn find_by_id(&self, id: &str) -> Result<Option<City>, AppError>;

    /// Returns every city whose point lies inside the given polygon ring.
    ///
    /// The ring is a closed rectangle in `(lon, lat)` order; a ring with
    /// `min_lon > max_lon` wraps across the antimeridian. Result order is
    /// whatever the store produces.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    async fn find_within(&self, ring: PolygonRing) -> Result<Vec<City>, AppError>;

    /// Persists an import batch.
    ///
    /// First error aborts the whole batch; partial-success semantics are
    /// deliberately not offered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    async fn insert_batch(&self, cities: Vec<NewCity>) -> Result<(), AppError>;
}
