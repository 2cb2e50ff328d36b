//! Bounding-box computation for radius queries.
//!
//! Approximates a circular search radius around a center coordinate with an
//! axis-aligned rectangle in degree space, suitable for a containment query
//! against a spatial index.

use super::Coordinate;

/// Mean earth radius in kilometers (spherical approximation).
pub const EARTH_RADIUS_KM: f64 = 6371.01;

const MIN_LAT_RAD: f64 = -std::f64::consts::FRAC_PI_2;
const MAX_LAT_RAD: f64 = std::f64::consts::FRAC_PI_2;
const MIN_LON_RAD: f64 = -std::f64::consts::PI;
const MAX_LON_RAD: f64 = std::f64::consts::PI;

/// Closed 5-point polygon ring, `(lon, lat)` pairs, first == last.
pub type PolygonRing = [[f64; 2]; 5];

/// Axis-aligned rectangle in latitude/longitude degrees.
///
/// Ephemeral: constructed per request, never persisted. When the box crosses
/// the antimeridian, `min_lon > max_lon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Computes the bounding box for a circle of `radius_km` around `center`.
    ///
    /// Spherical-earth approximation: latitude bounds are the center latitude
    /// offset by the angular radius; longitude bounds widen with latitude via
    /// `asin(sin(a) / cos(lat))`. Longitudes falling outside ±180° wrap
    /// across the antimeridian.
    ///
    /// When the circle crosses a pole, the latitude bounds are clamped to
    /// ±90° and the box degenerates to a full-longitude band. This is the
    /// conservative choice for a rectangular box representation.
    ///
    /// Pure and deterministic: identical inputs produce bit-identical output.
    pub fn around(center: Coordinate, radius_km: f64) -> Self {
        let angular_radius = radius_km / EARTH_RADIUS_KM;

        let lon_rad = center.lon.to_radians();
        let lat_rad = center.lat.to_radians();

        let mut min_lat = lat_rad - angular_radius;
        let mut max_lat = lat_rad + angular_radius;

        let (min_lon, max_lon) = if min_lat > MIN_LAT_RAD && max_lat < MAX_LAT_RAD {
            let delta_lon = (angular_radius.sin() / lat_rad.cos()).asin();

            let mut min_lon = lon_rad - delta_lon;
            if min_lon < MIN_LON_RAD {
                min_lon += 2.0 * std::f64::consts::PI;
            }

            let mut max_lon = lon_rad + delta_lon;
            if max_lon > MAX_LON_RAD {
                max_lon -= 2.0 * std::f64::consts::PI;
            }

            (min_lon, max_lon)
        } else {
            // Circle crosses a pole: full longitude band.
            min_lat = min_lat.max(MIN_LAT_RAD);
            max_lat = max_lat.min(MAX_LAT_RAD);
            (MIN_LON_RAD, MAX_LON_RAD)
        };

        Self {
            min_lat: min_lat.to_degrees(),
            min_lon: min_lon.to_degrees(),
            max_lat: max_lat.to_degrees(),
            max_lon: max_lon.to_degrees(),
        }
    }

    /// Returns the box as a closed polygon ring, longitude first.
    ///
    /// This is the coordinate order the store's containment predicate expects.
    pub fn ring(&self) -> PolygonRing {
        [
            [self.min_lon, self.min_lat],
            [self.max_lon, self.min_lat],
            [self.max_lon, self.max_lat],
            [self.min_lon, self.max_lat],
            [self.min_lon, self.min_lat],
        ]
    }

    /// Returns true if the box wraps across the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }
}
