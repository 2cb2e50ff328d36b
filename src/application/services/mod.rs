//! Application services orchestrating domain logic.

mod city_service;

pub use city_service::CityService;
