//! PostgreSQL implementation of the city repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{City, NewCity};
use crate::domain::geo::PolygonRing;
use crate::domain::repositories::CityRepository;
use crate::error::AppError;

/// PostgreSQL repository for city storage and spatial lookups.
///
/// The point coordinate is stored twice: as the opaque WKB blob the core
/// hands back to callers, and as plain `lon`/`lat` columns the containment
/// query filters on. Both are written together at import time.
pub struct PgCityRepository {
    pool: Arc<PgPool>,
}

impl PgCityRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CityRow {
    cartodb_id: i64,
    name: String,
    population: i64,
    geom: Vec<u8>,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City::new(row.cartodb_id, row.name, row.population, row.geom)
    }
}

#[async_trait]
impl CityRepository for PgCityRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<City>, AppError> {
        // Identifiers are numeric in the store; anything else matches nothing.
        let Ok(cartodb_id) = id.parse::<i64>() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, CityRow>(
            r#"
            SELECT cartodb_id, name, population, geom
            FROM cities
            WHERE cartodb_id = $1
            "#,
        )
        .bind(cartodb_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(City::from))
    }

    async fn find_within(&self, ring: PolygonRing) -> Result<Vec<City>, AppError> {
        let west = ring[0][0];
        let east = ring[1][0];
        let south = ring[0][1];
        let north = ring[2][1];

        // A ring with west > east wraps across the antimeridian and splits
        // into two longitude intervals.
        let rows = sqlx::query_as::<_, CityRow>(
            r#"
            SELECT cartodb_id, name, population, geom
            FROM cities
            WHERE lat >= $1 AND lat <= $2
              AND (
                    ($3::float8 <= $4::float8 AND lon >= $3 AND lon <= $4)
                 OR ($3::float8 >  $4::float8 AND (lon >= $3 OR lon <= $4))
              )
            "#,
        )
        .bind(south)
        .bind(north)
        .bind(west)
        .bind(east)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn insert_batch(&self, cities: Vec<NewCity>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for city in cities {
            sqlx::query(
                r#"
                INSERT INTO cities
                    (cartodb_id, name, place_key, capital, pclass, population,
                     lon, lat, geom, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT (cartodb_id) DO UPDATE SET
                    name = EXCLUDED.name,
                    place_key = EXCLUDED.place_key,
                    capital = EXCLUDED.capital,
                    pclass = EXCLUDED.pclass,
                    population = EXCLUDED.population,
                    lon = EXCLUDED.lon,
                    lat = EXCLUDED.lat,
                    geom = EXCLUDED.geom,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(city.cartodb_id)
            .bind(&city.name)
            .bind(&city.place_key)
            .bind(&city.capital)
            .bind(&city.pclass)
            .bind(city.population)
            .bind(city.coordinate.lon)
            .bind(city.coordinate.lat)
            .bind(&city.geom)
            .bind(city.created_at)
            .bind(city.updated_at)
            .execute(tx.as_mut())
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
