use super::geo_model::Coordinates;

/// Country → location and display name lookups.
pub trait CoordinateLookupTrait: Send + Sync {
    /// `None` when the country has no known location.
    fn coordinates(&self, country_code: &str) -> Option<Coordinates>;
    fn country_name(&self, country_code: &str) -> Option<String>;
}
