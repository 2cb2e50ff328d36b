//! Application layer: business logic between the API and the store.

pub mod services;
