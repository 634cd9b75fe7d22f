//! Geographic domain models.

use serde::{Deserialize, Serialize};

/// A point in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Sentinel attached to entries whose country has no known location.
    pub const UNKNOWN: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

/// Country directory entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-2
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Country {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Trims and upper-cases a country code.
pub fn normalize_country_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
