//! SQLite storage implementation for Tradewise.
//!
//! This crate holds every Diesel dependency of the workspace. It implements the
//! data collaborators the ranking engine reads from:
//! - historical trade flows (`trade_flows`)
//! - marketplace listings (`marketplace_listings`)
//! - treaty-covered destinations (`treaty_destinations`)
//!
//! ```text
//!   core (ranking engine, traits)
//!                │
//!                ▼
//!   storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod marketplace;
pub mod trade_flows;
pub mod treaties;

// Re-export database utilities
pub use db::{create_pool, get_connection, get_db_path, init, run_migrations, DbConnection, DbPool};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use marketplace::MarketplaceListingRepository;
pub use trade_flows::TradeFlowRepository;
pub use treaties::TreatyDestinationRepository;

// Re-export from tradewise-core for convenience
pub use tradewise_core::errors::{DatabaseError, Error, Result};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tradewise_core::opportunities::{
        ListingStatus, ListingType, MarketFlowRecord, MarketplaceListing, OpportunityServiceTrait,
        TreatyDestinationRecord,
    };
    use tradewise_core::{EngineConfig, OpportunityService, PreferenceResolver};

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sqlite_repositories_feed_ranking_within_deadline() {
        let (_dir, pool) = db::test_pool();
        let flows = TradeFlowRepository::new(pool.clone());
        let listings = MarketplaceListingRepository::new(pool.clone());
        let treaties = TreatyDestinationRepository::new(pool);

        flows
            .insert_flows(vec![MarketFlowRecord {
                origin: "AR".to_string(),
                destination: "BR".to_string(),
                commodity_code: "100199".to_string(),
                year: 2023,
                volume: 500.0,
                value: 125_000.0,
            }])
            .unwrap();
        listings
            .upsert_listing(MarketplaceListing {
                id: "cn-wheat".to_string(),
                requester_country: "CN".to_string(),
                commodity_code: "1001".to_string(),
                listing_type: ListingType::Buy,
                status: ListingStatus::Active,
                quantity: 40.0,
            })
            .unwrap();
        treaties
            .insert_treaty_destinations(vec![TreatyDestinationRecord {
                origin: "AR".to_string(),
                destination: "BR".to_string(),
                agreements: vec!["MERCOSUR".to_string()],
            }])
            .unwrap();

        let config = EngineConfig {
            request_timeout: Duration::from_secs(5),
            ..EngineConfig::default()
        };
        let service = OpportunityService::new(
            Arc::new(flows),
            Arc::new(listings),
            Arc::new(treaties),
            Arc::new(PreferenceResolver::with_embedded_registry()),
        )
        .with_config(config);

        let result = service.rank_with_timeout("1001", Some("AR")).await.unwrap();

        assert_eq!(result.top_buyers.entries()[0].country_code, "BR");
        assert_eq!(result.treaty_recommendations.entries()[0].country_code, "BR");
        assert_eq!(result.marketplace_recommendations.entries()[0].country_code, "CN");
    }
}
