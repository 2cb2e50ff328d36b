//! DTOs for the GeoJSON import endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A GeoJSON-like feature collection of point cities.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportRequest {
    #[validate(length(min = 1, message = "features must not be empty"))]
    #[validate(nested)]
    pub features: Vec<Feature>,
}

/// One feature record; becomes one city entity.
///
/// `Serialize` is required by the `length` validator on
/// [`ImportRequest::features`], which attaches the offending value to the
/// validation error.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    pub geometry: GeometryDto,

    #[validate(nested)]
    pub properties: FeatureProperties,
}

/// Raw geometry as submitted. Only `Point` with `[lon, lat]` is importable.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeometryDto {
    #[serde(rename = "type")]
    pub kind: String,

    pub coordinates: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct FeatureProperties {
    pub name: String,

    #[serde(default)]
    pub place_key: Option<String>,

    #[serde(default)]
    pub capital: Option<String>,

    #[validate(range(min = 0, message = "population must be non-negative"))]
    pub population: i64,

    #[serde(default)]
    pub pclass: Option<String>,

    pub cartodb_id: i64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
