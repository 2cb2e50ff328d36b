//! WKB point geometry codec.
//!
//! Cities persist their location as a WKB blob owned by the store. Only
//! single-point geometries are supported: decoding anything else is a typed
//! error, never silently zeroed coordinates.

use geo_types::{Geometry, Point};
use geozero::wkb::Wkb;
use geozero::{CoordDimensions, ToGeo, ToWkb};
use thiserror::Error;

use super::Coordinate;

/// Failure while encoding or decoding persisted geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The buffer is not valid WKB (truncated, bad byte order, bad tag).
    #[error("malformed geometry encoding: {0}")]
    Malformed(String),

    /// The buffer decoded cleanly but is not a point.
    #[error("expected a point geometry, found {0}")]
    NotAPoint(&'static str),

    /// The value could not be encoded to WKB.
    #[error("failed to encode geometry: {0}")]
    Encode(String),
}

/// Decodes a WKB blob into a coordinate pair.
///
/// # Errors
///
/// [`GeometryError::Malformed`] for buffers that are not valid WKB and
/// [`GeometryError::NotAPoint`] for valid WKB of any other geometry type.
pub fn decode_point(blob: &[u8]) -> Result<Coordinate, GeometryError> {
    let geometry = Wkb(blob.to_vec())
        .to_geo()
        .map_err(|e| GeometryError::Malformed(e.to_string()))?;

    match geometry {
        Geometry::Point(point) => Ok(Coordinate::new(point.x(), point.y())),
        other => Err(GeometryError::NotAPoint(geometry_kind(&other))),
    }
}

/// Encodes a coordinate pair as a WKB point blob.
pub fn encode_point(coordinate: Coordinate) -> Result<Vec<u8>, GeometryError> {
    let geometry: Geometry<f64> = Geometry::Point(Point::new(coordinate.lon, coordinate.lat));
    geometry
        .to_wkb(CoordDimensions::xy())
        .map_err(|e| GeometryError::Encode(e.to_string()))
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "unsupported geometry",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn round_trip_preserves_coordinates() {
        let original = Coordinate::new(-83.108128, 42.100072);
        let blob = encode_point(original).unwrap();
        let decoded = decode_point(&blob).unwrap();
        assert!((decoded.lon - original.lon).abs() < 1e-12);
        assert!((decoded.lat - original.lat).abs() < 1e-12);
    }

    #[test]
    fn round_trip_at_extremes() {
        for (lon, lat) in [(-180.0, -90.0), (180.0, 90.0), (0.0, 0.0)] {
            let blob = encode_point(Coordinate::new(lon, lat)).unwrap();
            let decoded = decode_point(&blob).unwrap();
            assert_eq!(decoded, Coordinate::new(lon, lat));
        }
    }

    #[test]
    fn rejects_truncated_buffer() {
        let blob = encode_point(Coordinate::new(1.0, 2.0)).unwrap();
        let err = decode_point(&blob[..blob.len() - 4]).unwrap_err();
        assert!(matches!(err, GeometryError::Malformed(_)));
    }

    #[test]
    fn rejects_empty_buffer() {
        let err = decode_point(&[]).unwrap_err();
        assert!(matches!(err, GeometryError::Malformed(_)));
    }

    #[test]
    fn rejects_non_point_geometry() {
        let poly: Geometry<f64> = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]);
        let blob = poly.to_wkb(CoordDimensions::xy()).unwrap();
        let err = decode_point(&blob).unwrap_err();
        assert!(matches!(err, GeometryError::NotAPoint("Polygon")));
    }
}
