use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use tradewise_core::opportunities::{
    ListingStatus, MarketplaceListing, MarketplaceListingRepositoryTrait,
};
use tradewise_core::Result;

use super::model::MarketplaceListingDB;
use crate::db::{get_connection, run_blocking, DbPool};
use crate::errors::StorageError;
use crate::schema::marketplace_listings;

#[derive(Clone)]
pub struct MarketplaceListingRepository {
    pool: Arc<DbPool>,
}

impl MarketplaceListingRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        MarketplaceListingRepository { pool }
    }

    pub fn load_listings_by_prefix_impl(&self, prefix: &str) -> Result<Vec<MarketplaceListing>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = marketplace_listings::table
            .filter(marketplace_listings::commodity_code.like(format!("{}%", prefix)))
            .order(marketplace_listings::id.asc())
            .select(MarketplaceListingDB::as_select())
            .load::<MarketplaceListingDB>(&mut conn)
            .map_err(StorageError::from)?;
        debug!("Loaded {} listing row(s) for prefix {}", rows.len(), prefix);
        rows.into_iter()
            .map(|row| MarketplaceListing::try_from(row).map_err(Into::into))
            .collect()
    }

    /// Inserts or replaces a listing. A blank id gets a fresh one.
    pub fn upsert_listing(&self, listing: MarketplaceListing) -> Result<MarketplaceListing> {
        let mut conn = get_connection(&self.pool)?;
        let row = MarketplaceListingDB::from(listing);
        diesel::insert_into(marketplace_listings::table)
            .values(&row)
            .on_conflict(marketplace_listings::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(MarketplaceListing::try_from(row)?)
    }

    pub fn update_status(&self, listing_id: &str, status: ListingStatus) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let updated = diesel::update(marketplace_listings::table.find(listing_id))
            .set(marketplace_listings::status.eq(status.as_str()))
            .execute(&mut conn)
            .map_err(StorageError::from)?;
        Ok(updated)
    }
}

#[async_trait]
impl MarketplaceListingRepositoryTrait for MarketplaceListingRepository {
    async fn find_listings_by_prefix(&self, prefix: &str) -> Result<Vec<MarketplaceListing>> {
        let repo = self.clone();
        let prefix = prefix.to_string();
        run_blocking("marketplace_listings", move || {
            repo.load_listings_by_prefix_impl(&prefix)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use tradewise_core::errors::{DataSourceError, Error};
    use tradewise_core::opportunities::ListingType;

    fn listing(
        id: &str,
        country: &str,
        code: &str,
        listing_type: ListingType,
    ) -> MarketplaceListing {
        MarketplaceListing {
            id: id.to_string(),
            requester_country: country.to_string(),
            commodity_code: code.to_string(),
            listing_type,
            status: ListingStatus::Active,
            quantity: 25.0,
        }
    }

    #[tokio::test]
    async fn test_find_listings_by_prefix_returns_every_type_and_status() {
        let (_dir, pool) = test_pool();
        let repo = MarketplaceListingRepository::new(pool);
        repo.upsert_listing(listing("l1", "cn", "100199", ListingType::Buy)).unwrap();
        repo.upsert_listing(listing("l2", "JP", "1001", ListingType::Sell)).unwrap();
        repo.upsert_listing(listing("l3", "JP", "0201", ListingType::Buy)).unwrap();
        repo.update_status("l2", ListingStatus::Closed).unwrap();

        let found = repo.find_listings_by_prefix("1001").await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].requester_country, "CN");
        assert_eq!(found[1].status, ListingStatus::Closed);
        assert_eq!(found[1].listing_type, ListingType::Sell);
    }

    #[tokio::test]
    async fn test_upsert_assigns_id_and_replaces() {
        let (_dir, pool) = test_pool();
        let repo = MarketplaceListingRepository::new(pool);

        let stored = repo.upsert_listing(listing("", "CN", "1001", ListingType::Buy)).unwrap();
        assert!(!stored.id.is_empty());

        let mut changed = stored.clone();
        changed.quantity = 99.0;
        repo.upsert_listing(changed).unwrap();

        let found = repo.find_listings_by_prefix("1001").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].quantity, 99.0);
    }

    #[test]
    fn test_unknown_listing_type_is_malformed() {
        let row = MarketplaceListingDB {
            id: "l1".to_string(),
            requester_country: "CN".to_string(),
            commodity_code: "1001".to_string(),
            listing_type: "LEASE".to_string(),
            status: "ACTIVE".to_string(),
            quantity: 1.0,
        };

        let err: Error = MarketplaceListing::try_from(row).unwrap_err().into();

        assert!(matches!(err, Error::DataSource(DataSourceError::Malformed { .. })));
    }
}
