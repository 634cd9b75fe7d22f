//! JSON-driven country directory.
//!
//! Loads `countries.json` at compile time and indexes it by code once via
//! `lazy_static`.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Deserialize;

use super::geo_model::{normalize_country_code, Coordinates, Country};
use super::geo_traits::CoordinateLookupTrait;
use crate::errors::Result;

#[derive(Debug, Deserialize)]
struct CountriesFile {
    countries: Vec<Country>,
}

#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    by_code: HashMap<String, Country>,
}

lazy_static! {
    static ref EMBEDDED: Arc<CountryDirectory> = Arc::new(
        CountryDirectory::from_json(include_str!("countries.json"))
            .expect("countries.json must be valid")
    );
}

impl CountryDirectory {
    pub fn embedded() -> Arc<CountryDirectory> {
        Arc::clone(&EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CountriesFile = serde_json::from_str(json)?;
        Ok(Self::from_countries(file.countries))
    }

    pub fn from_countries(countries: Vec<Country>) -> Self {
        let by_code = countries
            .into_iter()
            .map(|c| (normalize_country_code(&c.code), c))
            .collect();
        Self { by_code }
    }

    pub fn get(&self, country_code: &str) -> Option<&Country> {
        self.by_code.get(&normalize_country_code(country_code))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl CoordinateLookupTrait for CountryDirectory {
    fn coordinates(&self, country_code: &str) -> Option<Coordinates> {
        self.get(country_code).map(Country::coordinates)
    }

    fn country_name(&self, country_code: &str) -> Option<String> {
        self.get(country_code).map(|c| c.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_directory_lookup() {
        let directory = CountryDirectory::embedded();
        assert_eq!(directory.country_name("br").as_deref(), Some("Brazil"));
        let coords = directory.coordinates("AR").unwrap();
        assert!(coords.latitude < 0.0);
        assert!(!coords.is_placeholder());
    }

    #[test]
    fn test_unknown_country_has_no_coordinates() {
        let directory = CountryDirectory::embedded();
        assert!(directory.coordinates("XX").is_none());
        assert!(directory.country_name("XX").is_none());
    }

    #[test]
    fn test_placeholder_sentinel() {
        assert!(Coordinates::UNKNOWN.is_placeholder());
        assert_eq!(Coordinates::UNKNOWN, Coordinates::new(0.0, 0.0));
    }
}
