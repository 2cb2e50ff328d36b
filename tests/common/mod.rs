#![allow(dead_code)]

use std::sync::Arc;

use cities_api::application::services::CityService;
use cities_api::domain::entities::NewCity;
use cities_api::domain::geo::{encode_point, Coordinate};
use cities_api::infrastructure::persistence::MemoryCityRepository;
use cities_api::state::AppState;

/// State over the embedded store, so tests need no database.
pub fn create_test_state() -> AppState {
    let repository = Arc::new(MemoryCityRepository::new());
    AppState::new(Arc::new(CityService::new(repository)))
}

pub fn new_city(id: i64, name: &str, population: i64, lon: f64, lat: f64) -> NewCity {
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

/// Seeds a small cluster of cities around the Thames River mouth plus one
/// town roughly 60 km away.
pub async fn seed_ontario_cities(state: &AppState) {
    state
        .city_service
        .import(vec![
            new_city(42, "Amherstburg", 8921, -83.108128, 42.100072),
            new_city(106, "Lighthouse", 410, -82.452364, 42.290865),
            new_city(123, "Jeannettes Creek", 244, -82.421253, 42.315238),
            new_city(134, "Bradley", 2500, -82.411366, 42.339783),
        ])
        .await
        .unwrap();
}
