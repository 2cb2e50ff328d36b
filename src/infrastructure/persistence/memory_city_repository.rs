//! Embedded in-memory city repository backed by an R-tree.
//!
//! Used when the service runs without PostgreSQL (`STORE_BACKEND=memory`)
//! and by the integration tests. Point lookups go through a hash map, the
//! containment query through an `rstar` R-tree over `(lon, lat)` pairs.

use async_trait::async_trait;
use parking_lot::RwLock;
use rstar::{primitives::GeomWithData, RTree, AABB};
use std::collections::HashMap;

use crate::domain::entities::{City, NewCity};
use crate::domain::geo::PolygonRing;
use crate::domain::repositories::CityRepository;
use crate::error::AppError;

type IndexedPoint = GeomWithData<[f64; 2], i64>;

#[derive(Default)]
struct Inner {
    cities: HashMap<i64, City>,
    positions: HashMap<i64, [f64; 2]>,
    index: RTree<IndexedPoint>,
}

/// In-memory repository with an R-tree spatial index.
#[derive(Default)]
pub struct MemoryCityRepository {
    inner: RwLock<Inner>,
}

impl MemoryCityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CityRepository for MemoryCityRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<City>, AppError> {
        let Ok(cartodb_id) = id.parse::<i64>() else {
            return Ok(None);
        };

        Ok(self.inner.read().cities.get(&cartodb_id).cloned())
    }

    async fn find_within(&self, ring: PolygonRing) -> Result<Vec<City>, AppError> {
        let west = ring[0][0];
        let east = ring[1][0];
        let south = ring[0][1];
        let north = ring[2][1];

        let inner = self.inner.read();

        // A wrapped ring (west > east) splits into two envelopes on either
        // side of the antimeridian.
        let envelopes: Vec<AABB<[f64; 2]>> = if west <= east {
            vec![AABB::from_corners([west, south], [east, north])]
        } else {
            vec![
                AABB::from_corners([west, south], [180.0, north]),
                AABB::from_corners([-180.0, south], [east, north]),
            ]
        };

        let mut result = Vec::new();
        for envelope in &envelopes {
            for point in inner.index.locate_in_envelope(envelope) {
                if let Some(city) = inner.cities.get(&point.data) {
                    result.push(city.clone());
                }
            }
        }

        Ok(result)
    }

    async fn insert_batch(&self, cities: Vec<NewCity>) -> Result<(), AppError> {
        let mut inner = self.inner.write();

        for city in cities {
            let id = city.cartodb_id;
            let position = [city.coordinate.lon, city.coordinate.lat];

            // Re-imports replace the previous record and its index entry.
            if let Some(old) = inner.positions.remove(&id) {
                inner.index.remove(&IndexedPoint::new(old, id));
            }

            inner
                .cities
                .insert(id, City::new(id, city.name, city.population, city.geom));
            inner.positions.insert(id, position);
            inner.index.insert(IndexedPoint::new(position, id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{encode_point, BoundingBox, Coordinate};

    fn new_city(id: i64, name: &str, population: i64, lon: f64, lat: f64) -> NewCity {
        let coordinate = Coordinate::new(lon, lat);
        NewCity {
            cartodb_id: id,
            name: name.to_string(),
            place_key: None,
            capital: None,
            pclass: None,
            population,
            coordinate,
            geom: encode_point(coordinate).unwrap(),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let repo = MemoryCityRepository::new();
        repo.insert_batch(vec![new_city(42, "Amherstburg", 8921, -83.108128, 42.100072)])
            .await
            .unwrap();

        let city = repo.find_by_id("42").await.unwrap().unwrap();
        assert_eq!(city.name, "Amherstburg");

        assert!(repo.find_by_id("4234534").await.unwrap().is_none());
        assert!(repo.find_by_id("not-a-number").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn containment_query_filters_by_ring() {
        let repo = MemoryCityRepository::new();
        repo.insert_batch(vec![
            new_city(123, "Jeannettes Creek", 244, -82.421253, 42.315238),
            new_city(134, "Bradley", 2500, -82.411366, 42.339783),
            new_city(42, "Amherstburg", 8921, -83.108128, 42.100072),
        ])
        .await
        .unwrap();

        let ring = BoundingBox::around(Coordinate::new(-82.421253, 42.315238), 4.0).ring();
        let mut ids: Vec<i64> = repo
            .find_within(ring)
            .await
            .unwrap()
            .iter()
            .map(|c| c.cartodb_id)
            .collect();
        ids.sort_unstable();

        // Amherstburg is ~60 km away and must stay outside the box.
        assert_eq!(ids, vec![123, 134]);
    }

    #[tokio::test]
    async fn wrapped_ring_queries_both_sides_of_the_antimeridian() {
        let repo = MemoryCityRepository::new();
        repo.insert_batch(vec![
            new_city(1, "East of the line", 10, 179.95, 0.0),
            new_city(2, "West of the line", 20, -179.95, 0.0),
            new_city(3, "Far away", 30, 0.0, 0.0),
        ])
        .await
        .unwrap();

        let bbox = BoundingBox::around(Coordinate::new(179.99, 0.0), 50.0);
        assert!(bbox.crosses_antimeridian());

        let mut ids: Vec<i64> = repo
            .find_within(bbox.ring())
            .await
            .unwrap()
            .iter()
            .map(|c| c.cartodb_id)
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn reimport_replaces_existing_record() {
        let repo = MemoryCityRepository::new();
        repo.insert_batch(vec![new_city(5, "Old Name", 100, 10.0, 10.0)])
            .await
            .unwrap();
        repo.insert_batch(vec![new_city(5, "New Name", 200, 20.0, 20.0)])
            .await
            .unwrap();

        let city = repo.find_by_id("5").await.unwrap().unwrap();
        assert_eq!(city.name, "New Name");

        // Old index entry is gone.
        let old_ring = BoundingBox::around(Coordinate::new(10.0, 10.0), 5.0).ring();
        assert!(repo.find_within(old_ring).await.unwrap().is_empty());

        let new_ring = BoundingBox::around(Coordinate::new(20.0, 20.0), 5.0).ring();
        assert_eq!(repo.find_within(new_ring).await.unwrap().len(), 1);
    }
}
