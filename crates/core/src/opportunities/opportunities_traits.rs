use async_trait::async_trait;

use super::opportunities_model::{
    MarketFlowRecord, MarketplaceListing, OpportunityRecommendations, TreatyDestinationRecord,
};
use crate::errors::Result;

/// Historical trade flow source.
#[async_trait]
pub trait TradeFlowRepositoryTrait: Send + Sync {
    /// Flow records whose commodity code starts with `prefix`.
    async fn find_flows_by_prefix(&self, prefix: &str) -> Result<Vec<MarketFlowRecord>>;
}

/// Marketplace listing source.
#[async_trait]
pub trait MarketplaceListingRepositoryTrait: Send + Sync {
    /// Listings of any type and status whose commodity code starts with `prefix`.
    async fn find_listings_by_prefix(&self, prefix: &str) -> Result<Vec<MarketplaceListing>>;
}

/// Treaty-covered destination source.
#[async_trait]
pub trait TreatyDestinationRepositoryTrait: Send + Sync {
    /// All records, or only those leaving `origin` when given.
    async fn find_treaty_destinations(
        &self,
        origin: Option<&str>,
    ) -> Result<Vec<TreatyDestinationRecord>>;
}

/// Trait for opportunity ranking
#[async_trait]
pub trait OpportunityServiceTrait: Send + Sync {
    /// Ranks destination markets for a commodity code along three independent
    /// streams. A stream whose source fails is reported as failed without
    /// affecting the other two.
    async fn rank(
        &self,
        commodity_code: &str,
        origin: Option<&str>,
    ) -> Result<OpportunityRecommendations>;

    /// Same as `rank`, bounded by the configured request timeout.
    async fn rank_with_timeout(
        &self,
        commodity_code: &str,
        origin: Option<&str>,
    ) -> Result<OpportunityRecommendations>;
}
