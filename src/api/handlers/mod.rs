//! REST API handlers.

mod cities;
mod import;
mod status;

pub use cities::find_city_handler;
pub use import::import_handler;
pub use status::{not_found_handler, status_handler};
