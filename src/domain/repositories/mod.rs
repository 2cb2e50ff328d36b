//! Repository traits defining the store contract.
//!
//! - Implementations live in [`crate::infrastructure::persistence`]
//! - Mock implementations are auto-generated via `mockall` for testing

mod city_repository;

pub use city_repository::CityRepository;

#[cfg(test)]
pub use city_repository::MockCityRepository;
