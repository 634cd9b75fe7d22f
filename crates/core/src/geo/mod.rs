//! Geography module - country directory and coordinate lookups.

mod country_directory;
mod geo_model;
mod geo_traits;

pub use country_directory::CountryDirectory;
pub use geo_model::{normalize_country_code, Coordinates, Country};
pub use geo_traits::CoordinateLookupTrait;
