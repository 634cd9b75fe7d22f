//! Database models for marketplace listings.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tradewise_core::opportunities::MarketplaceListing;
use uuid::Uuid;

use crate::errors::StorageError;

/// Database model for marketplace listings
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::marketplace_listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListingDB {
    pub id: String,
    pub requester_country: String,
    pub commodity_code: String,
    /// `BUY` or `SELL`
    pub listing_type: String,
    /// `ACTIVE` or `CLOSED`
    pub status: String,
    pub quantity: f64,
}

impl TryFrom<MarketplaceListingDB> for MarketplaceListing {
    type Error = StorageError;

    fn try_from(db: MarketplaceListingDB) -> Result<Self, Self::Error> {
        let malformed = |e: tradewise_core::errors::ValidationError| StorageError::MalformedRow {
            table: "marketplace_listings",
            message: format!("listing {}: {}", db.id, e),
        };
        let listing_type = db.listing_type.parse().map_err(malformed)?;
        let status = db.status.parse().map_err(malformed)?;
        Ok(Self {
            id: db.id,
            requester_country: db.requester_country,
            commodity_code: db.commodity_code,
            listing_type,
            status,
            quantity: db.quantity,
        })
    }
}

impl From<MarketplaceListing> for MarketplaceListingDB {
    fn from(listing: MarketplaceListing) -> Self {
        let id = if listing.id.trim().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            listing.id
        };
        Self {
            id,
            requester_country: listing.requester_country.trim().to_ascii_uppercase(),
            commodity_code: listing.commodity_code.trim().to_string(),
            listing_type: listing.listing_type.as_str().to_string(),
            status: listing.status.as_str().to_string(),
            quantity: listing.quantity,
        }
    }
}
