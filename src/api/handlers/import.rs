//! Handler for bulk GeoJSON import.

use axum::{body::Bytes, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::import::{Feature, ImportRequest};
use crate::domain::entities::NewCity;
use crate::domain::geo::{encode_point, Coordinate};
use crate::error::AppError;
use crate::state::AppState;

/// Imports a GeoJSON feature collection of point cities.
///
/// # Endpoint
///
/// `POST /import`
///
/// The body is parsed manually rather than through the JSON extractor so
/// malformed payloads map to 422 with the parse error in the body.
///
/// # Errors
///
/// Returns 422 for unparseable JSON, validation failures, non-Point
/// geometries, or a coordinate array that is not exactly `[lon, lat]`.
/// The first bad feature aborts the whole batch.
pub async fn import_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let payload: ImportRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::unprocessable(format!("Invalid import payload: {e}")))?;
    payload.validate()?;

    let mut batch = Vec::with_capacity(payload.features.len());
    for feature in payload.features {
        batch.push(to_new_city(feature)?);
    }

    state.city_service.import(batch).await?;

    Ok(StatusCode::CREATED)
}

/// Converts one feature into a typed import record, encoding its geometry.
fn to_new_city(feature: Feature) -> Result<NewCity, AppError> {
    let geometry = &feature.geometry;

    if geometry.kind != "Point" {
        return Err(AppError::unprocessable(format!(
            "Unsupported geometry type '{}', only Point features can be imported",
            geometry.kind
        )));
    }

    let [lon, lat] = geometry.coordinates[..] else {
        return Err(AppError::unprocessable(format!(
            "Point geometry expects exactly [lon, lat], got {} values",
            geometry.coordinates.len()
        )));
    };

    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(AppError::unprocessable(format!(
            "Coordinate [{lon}, {lat}] is outside the legal degree ranges"
        )));
    }

    let coordinate = Coordinate::new(lon, lat);
    let geom =
        encode_point(coordinate).map_err(|e| AppError::unprocessable(e.to_string()))?;

    let properties = feature.properties;
    Ok(NewCity {
        cartodb_id: properties.cartodb_id,
        name: properties.name,
        place_key: properties.place_key,
        capital: properties.capital,
        pclass: properties.pclass,
        population: properties.population,
        coordinate,
        geom,
        created_at: properties.created_at,
        updated_at: properties.updated_at,
    })
}
