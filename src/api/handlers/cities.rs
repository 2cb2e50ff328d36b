//! Handler for city lookup and radius queries.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::dto::city::{CitiesResponse, CityResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Looks up a city by id, optionally expanding to all cities within a radius.
///
/// # Endpoint
///
/// `GET /id/{id}[?dist=N]`
///
/// # Query Parameters
///
/// `dist` is the only accepted parameter: a non-negative integer radius in
/// kilometers, given at most once. Any other parameter rejects the whole
/// request, even when `dist` itself is valid.
///
/// # Response Shapes
///
/// - no `dist`      → single city object
/// - `dist=0`       → `{cities: [<center city>]}` (singleton collection)
/// - `dist=N`, N>0  → `{cities: [...]}` in store order
///
/// # Errors
///
/// - 404 when the id matches nothing, before any `dist` handling
/// - 400 for a non-numeric `dist` or unknown query parameters
pub async fn find_city_handler(
    Path(id): Path<String>,
    // Raw pairs rather than a map: a repeated key must be a 400, not a
    // silent last-one-wins.
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Some(city) = state.city_service.find_city(&id).await? else {
        return Err(AppError::not_found(format!("City with id {id} not found")));
    };

    let Some(dist) = parse_dist_param(&params)? else {
        return Ok(Json(CityResponse::from(city)).into_response());
    };

    let cities = state.city_service.cities_around(&city, dist).await?;

    Ok(Json(CitiesResponse::from(cities)).into_response())
}

/// Validates the query string: only `dist` is accepted, exactly once, as a
/// `u64`.
fn parse_dist_param(params: &[(String, String)]) -> Result<Option<u64>, AppError> {
    if params.iter().any(|(key, _)| key != "dist") {
        return Err(AppError::bad_request("Unknown query string parameters"));
    }

    let mut values = params.iter().map(|(_, value)| value);
    let Some(raw) = values.next() else {
        return Ok(None);
    };
    if values.next().is_some() {
        return Err(AppError::bad_request(
            "Too many values for parameter 'dist'",
        ));
    }

    raw.parse::<u64>().map(Some).map_err(|_| {
        AppError::bad_request(format!(
            "Invalid uint query string value '{raw}' for parameter 'dist'"
        ))
    })
}
