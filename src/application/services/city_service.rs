//! City lookup and proximity query service.

use std::sync::Arc;

use crate::domain::entities::{CityView, NewCity};
use crate::domain::geo::{decode_point, BoundingBox};
use crate::domain::repositories::CityRepository;
use crate::error::AppError;

/// Orchestrates lookups and radius queries against the city store.
///
/// Read paths decode the store's binary geometry into coordinate pairs;
/// any decode failure aborts the whole operation rather than returning
/// partial results.
pub struct CityService {
    repository: Arc<dyn CityRepository>,
}

impl CityService {
    /// Creates a new service over a store handle.
    pub fn new(repository: Arc<dyn CityRepository>) -> Self {
        Self { repository }
    }

    /// Fetches a single city by identifier and decodes its geometry.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(view))` if found
    /// - `Ok(None)` if no city matches the identifier
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures or when the persisted
    /// geometry does not decode to a point.
    pub async fn find_city(&self, id: &str) -> Result<Option<CityView>, AppError> {
        let Some(city) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let coordinate = decode_point(&city.geom)?;

        Ok(Some(CityView {
            cartodb_id: city.cartodb_id,
            name: city.name,
            population: city.population,
            coordinate,
        }))
    }

    /// Returns all cities within `radius_km` of the given center city.
    ///
    /// A zero radius short-circuits to a singleton of the center itself: a
    /// degenerate bounding box would make an ill-defined spatial query, so
    /// the store is never consulted. Otherwise the radius becomes a bounding
    /// box, the box a closed polygon ring, and the ring a containment query.
    ///
    /// Result order is whatever the store returns; no sort is imposed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures or if any returned
    /// entity carries geometry that does not decode to a point. There are no
    /// partial results.
    pub async fn cities_around(
        &self,
        center: &CityView,
        radius_km: u64,
    ) -> Result<Vec<CityView>, AppError> {
        if radius_km == 0 {
            return Ok(vec![center.clone()]);
        }

        let bbox = BoundingBox::around(center.coordinate, radius_km as f64);
        let cities = self.repository.find_within(bbox.ring()).await?;

        let mut views = Vec::with_capacity(cities.len());
        for city in cities {
            let coordinate = decode_point(&city.geom)?;
            views.push(CityView {
                cartodb_id: city.cartodb_id,
                name: city.name,
                population: city.population,
                coordinate,
            });
        }

        Ok(views)
    }

    /// Persists an import batch. First error aborts the batch.
    pub async fn import(&self, cities: Vec<NewCity>) -> Result<(), AppError> {
        let count = cities.len();
        self.repository.insert_batch(cities).await?;
        tracing::info!(count, "imported city features");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::City;
    use crate::domain::geo::{encode_point, Coordinate};
    use crate::domain::repositories::MockCityRepository;

    fn stored_city(id: i64, name: &str, population: i64, lon: f64, lat: f64) -> City {
        City::new(
            id,
            name.to_string(),
            population,
            encode_point(Coordinate::new(lon, lat)).unwrap(),
        )
    }

    fn center_view() -> CityView {
        CityView {
            cartodb_id: 123,
            name: "Jeannettes Creek".to_string(),
            population: 244,
            coordinate: Coordinate::new(-82.421253, 42.315238),
        }
    }

    #[tokio::test]
    async fn find_city_decodes_geometry() {
        let mut repo = MockCityRepository::new();
        repo.expect_find_by_id()
            .withf(|id| id == "42")
            .times(1)
            .returning(|_| Ok(Some(stored_city(42, "Amherstburg", 8921, -83.108128, 42.100072))));

        let service = CityService::new(Arc::new(repo));
        let view = service.find_city("42").await.unwrap().unwrap();

        assert_eq!(view.cartodb_id, 42);
        assert_eq!(view.name, "Amherstburg");
        assert_eq!(view.population, 8921);
        assert!((view.coordinate.lon - -83.108128).abs() < 1e-12);
        assert!((view.coordinate.lat - 42.100072).abs() < 1e-12);
    }

    #[tokio::test]
    async fn find_city_absent_is_none_not_error() {
        let mut repo = MockCityRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = CityService::new(Arc::new(repo));
        assert!(service.find_city("4234534").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_city_bad_geometry_is_internal_error() {
        let mut repo = MockCityRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| {
            Ok(Some(City::new(7, "Broken".to_string(), 1, vec![0x01, 0x02])))
        });

        let service = CityService::new(Arc::new(repo));
        let err = service.find_city("7").await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn zero_radius_skips_the_store() {
        // No expectation on find_within: any call would panic the mock.
        let repo = MockCityRepository::new();
        let service = CityService::new(Arc::new(repo));

        let center = center_view();
        let result = service.cities_around(&center, 0).await.unwrap();
        assert_eq!(result, vec![center]);
    }

    #[tokio::test]
    async fn radius_query_uses_computed_ring_and_decodes_all() {
        let center = center_view();
        let expected_ring = BoundingBox::around(center.coordinate, 4.0).ring();

        let mut repo = MockCityRepository::new();
        repo.expect_find_within()
            .withf(move |ring| *ring == expected_ring)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    stored_city(134, "Bradley", 2500, -82.411366, 42.339783),
                    stored_city(123, "Jeannettes Creek", 244, -82.421253, 42.315238),
                    stored_city(106, "Lighthouse", 410, -82.452364, 42.290865),
                ])
            });

        let service = CityService::new(Arc::new(repo));
        let views = service.cities_around(&center, 4).await.unwrap();

        // Store order is preserved as-is.
        assert_eq!(
            views.iter().map(|v| v.cartodb_id).collect::<Vec<_>>(),
            vec![134, 123, 106]
        );
    }

    #[tokio::test]
    async fn one_bad_geometry_aborts_the_whole_query() {
        let mut repo = MockCityRepository::new();
        repo.expect_find_within().times(1).returning(|_| {
            Ok(vec![
                stored_city(134, "Bradley", 2500, -82.411366, 42.339783),
                City::new(999, "Corrupt".to_string(), 0, vec![0xff]),
            ])
        });

        let service = CityService::new(Arc::new(repo));
        let err = service
            .cities_around(&center_view(), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn import_delegates_to_store() {
        let mut repo = MockCityRepository::new();
        repo.expect_insert_batch()
            .withf(|cities| cities.len() == 1 && cities[0].cartodb_id == 42)
            .times(1)
            .returning(|_| Ok(()));

        let service = CityService::new(Arc::new(repo));
        let coordinate = Coordinate::new(-83.108128, 42.100072);
        let batch = vec![NewCity {
            cartodb_id: 42,
            name: "Amherstburg".to_string(),
            place_key: None,
            capital: None,
            pclass: None,
            population: 8921,
            coordinate,
            geom: encode_point(coordinate).unwrap(),
            created_at: None,
            updated_at: None,
        }];

        service.import(batch).await.unwrap();
    }
}
