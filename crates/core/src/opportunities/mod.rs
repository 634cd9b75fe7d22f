//! Opportunities module - destination ranking across trade flows, treaties and marketplace demand.

mod opportunities_model;
mod opportunities_traits;
mod opportunity_service;
mod ranking;

pub use opportunities_model::{
    ListingStatus, ListingType, MarketFlowRecord, MarketplaceDemand, MarketplaceDemandSignal,
    MarketplaceListing, OpportunityRecommendations, RankedOpportunity, StreamResult, TopBuyer,
    TreatyBenefit, TreatyDestinationRecord,
};
pub use opportunities_traits::{
    MarketplaceListingRepositoryTrait, OpportunityServiceTrait, TradeFlowRepositoryTrait,
    TreatyDestinationRepositoryTrait,
};
pub use opportunity_service::OpportunityService;
pub use ranking::{
    aggregate_demand_signals, aggregate_top_buyers, rank_marketplace_demand, rank_top_buyers,
    rank_treaty_destinations, select_treaty_destinations,
};
