//! City entity: a named point location owned by the store.

use chrono::{DateTime, Utc};

use crate::domain::geo::Coordinate;

/// A city as persisted by the store.
///
/// The geometry is an opaque WKB blob; callers decode it through the
/// geometry codec when they need the coordinate pair.
#[derive(Debug, Clone)]
pub struct City {
    pub cartodb_id: i64,
    pub name: String,
    pub population: i64,
    pub geom: Vec<u8>,
}

impl City {
    pub fn new(cartodb_id: i64, name: String, population: i64, geom: Vec<u8>) -> Self {
        Self {
            cartodb_id,
            name,
            population,
            geom,
        }
    }
}

/// A city with its geometry already decoded.
///
/// This is the view handed to the API layer; it never carries the raw blob.
#[derive(Debug, Clone, PartialEq)]
pub struct CityView {
    pub cartodb_id: i64,
    pub name: String,
    pub population: i64,
    pub coordinate: Coordinate,
}

/// Input record for the import path, one per GeoJSON feature.
///
/// Every field is typed up front; the store never sees dynamic values.
#[derive(Debug, Clone)]
pub struct NewCity {
    pub cartodb_id: i64,
    pub name: String,
    pub place_key: Option<String>,
    pub capital: Option<String>,
    pub pclass: Option<String>,
    pub population: i64,
    pub coordinate: Coordinate,
    pub geom: Vec<u8>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::{decode_point, encode_point};

    #[test]
    fn city_geometry_round_trips_through_codec() {
        let coordinate = Coordinate::new(-83.108128, 42.100072);
        let city = City::new(
            42,
            "Amherstburg".to_string(),
            8921,
            encode_point(coordinate).unwrap(),
        );

        assert_eq!(city.cartodb_id, 42);
        assert_eq!(decode_point(&city.geom).unwrap(), coordinate);
    }
}
