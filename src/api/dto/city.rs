//! DTOs for city lookup responses.

use serde::Serialize;

use crate::domain::entities::CityView;

/// JSON representation of a single city.
///
/// `coordinates` is a `[lon, lat]` pair, matching the imported GeoJSON order.
#[derive(Debug, Serialize)]
pub struct CityResponse {
    pub cartodb_id: i64,
    pub name: String,
    pub population: i64,
    pub coordinates: [f64; 2],
}

impl From<CityView> for CityResponse {
    fn from(view: CityView) -> Self {
        Self {
            cartodb_id: view.cartodb_id,
            name: view.name,
            population: view.population,
            coordinates: [view.coordinate.lon, view.coordinate.lat],
        }
    }
}

/// Collection envelope for radius queries.
///
/// Note: `dist=0` returns this envelope with a single element, while a
/// request without `dist` returns the bare [`CityResponse`] object. The two
/// shapes are deliberately different.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<CityResponse>,
}

impl From<Vec<CityView>> for CitiesResponse {
    fn from(views: Vec<CityView>) -> Self {
        Self {
            cities: views.into_iter().map(CityResponse::from).collect(),
        }
    }
}
