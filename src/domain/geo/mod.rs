//! Geospatial primitives: coordinates, bounding boxes, and the binary
//! geometry codec.

pub mod bounding_box;
pub mod codec;

pub use bounding_box::{BoundingBox, PolygonRing, EARTH_RADIUS_KM};
pub use codec::{decode_point, encode_point, GeometryError};

/// A WGS84-like coordinate pair in decimal degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}
