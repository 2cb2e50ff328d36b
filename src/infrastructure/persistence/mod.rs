//! Store backends implementing the repository traits.

mod memory_city_repository;
mod pg_city_repository;

pub use memory_city_repository::MemoryCityRepository;
pub use pg_city_repository::PgCityRepository;
