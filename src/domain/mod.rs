//! Domain layer: entities, geospatial primitives, and repository traits.

pub mod entities;
pub mod geo;
pub mod repositories;
