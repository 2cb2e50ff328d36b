//! Core business entities.

mod city;

pub use city::{City, CityView, NewCity};
