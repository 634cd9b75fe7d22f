//! Opportunity ranking service.
//!
//! Fans out to the three sources concurrently and ranks each stream on its own.
//! A failing source only turns its own stream into `StreamResult::Failed`.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::opportunities_model::{
    MarketplaceDemand, OpportunityRecommendations, RankedOpportunity, StreamResult, TopBuyer,
    TreatyBenefit,
};
use super::opportunities_traits::{
    MarketplaceListingRepositoryTrait, OpportunityServiceTrait, TradeFlowRepositoryTrait,
    TreatyDestinationRepositoryTrait,
};
use super::ranking::{rank_marketplace_demand, rank_top_buyers, rank_treaty_destinations};
use crate::commodities::{chapter_of, code_prefix};
use crate::config::EngineConfig;
use crate::errors::{Error, Result, ValidationError};
use crate::geo::{normalize_country_code, CoordinateLookupTrait, Coordinates, CountryDirectory};
use crate::preferences::PreferenceResolverTrait;

pub struct OpportunityService {
    flow_repository: Arc<dyn TradeFlowRepositoryTrait>,
    listing_repository: Arc<dyn MarketplaceListingRepositoryTrait>,
    treaty_repository: Arc<dyn TreatyDestinationRepositoryTrait>,
    preference_resolver: Arc<dyn PreferenceResolverTrait>,
    coordinate_lookup: Arc<dyn CoordinateLookupTrait>,
    config: EngineConfig,
}

impl OpportunityService {
    pub fn new(
        flow_repository: Arc<dyn TradeFlowRepositoryTrait>,
        listing_repository: Arc<dyn MarketplaceListingRepositoryTrait>,
        treaty_repository: Arc<dyn TreatyDestinationRepositoryTrait>,
        preference_resolver: Arc<dyn PreferenceResolverTrait>,
    ) -> Self {
        Self {
            flow_repository,
            listing_repository,
            treaty_repository,
            preference_resolver,
            coordinate_lookup: CountryDirectory::embedded(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_coordinate_lookup(
        mut self,
        coordinate_lookup: Arc<dyn CoordinateLookupTrait>,
    ) -> Self {
        self.coordinate_lookup = coordinate_lookup;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Trims and checks the code is all digits with a parsable chapter.
    fn validate_code(commodity_code: &str) -> Result<&str> {
        let code = commodity_code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::MalformedCommodityCode(code.to_string()).into());
        }
        chapter_of(code)?;
        Ok(code)
    }

    async fn top_buyers(
        &self,
        prefix: &str,
        origin: Option<&str>,
    ) -> Result<Vec<RankedOpportunity<TopBuyer>>> {
        let records = self.flow_repository.find_flows_by_prefix(prefix).await?;
        debug!("Loaded {} trade flow record(s) for prefix {}", records.len(), prefix);
        let ranked = rank_top_buyers(&records, prefix, origin, self.config.stream_limit);
        Ok(self.locate(ranked))
    }

    async fn treaty_recommendations(
        &self,
        commodity_code: &str,
        origin: Option<&str>,
    ) -> Result<Vec<RankedOpportunity<TreatyBenefit>>> {
        let records = self.treaty_repository.find_treaty_destinations(origin).await?;
        debug!("Loaded {} treaty destination record(s)", records.len());
        let ranked = rank_treaty_destinations(
            &records,
            commodity_code,
            origin,
            self.preference_resolver.as_ref(),
            self.config.stream_limit,
        )?;
        Ok(self.locate(ranked))
    }

    async fn marketplace_recommendations(
        &self,
        prefix: &str,
        origin: Option<&str>,
    ) -> Result<Vec<RankedOpportunity<MarketplaceDemand>>> {
        let listings = self.listing_repository.find_listings_by_prefix(prefix).await?;
        debug!("Loaded {} marketplace listing(s) for prefix {}", listings.len(), prefix);
        let excluded = origin.filter(|_| self.config.exclude_origin_demand);
        let ranked = rank_marketplace_demand(&listings, prefix, excluded, self.config.stream_limit);
        Ok(self.locate(ranked))
    }

    /// Attaches rank, display name and coordinates to ordered entries.
    fn locate<P>(&self, ranked: Vec<(String, P)>) -> Vec<RankedOpportunity<P>> {
        ranked
            .into_iter()
            .enumerate()
            .map(|(index, (country_code, payload))| {
                let coordinates = self
                    .coordinate_lookup
                    .coordinates(&country_code)
                    .unwrap_or_else(|| {
                        warn!(
                            "No coordinates for country {}, using placeholder",
                            country_code
                        );
                        Coordinates::UNKNOWN
                    });
                let country_name = self
                    .coordinate_lookup
                    .country_name(&country_code)
                    .unwrap_or_else(|| country_code.clone());
                RankedOpportunity {
                    rank: index + 1,
                    country_name,
                    country_code,
                    payload,
                    coordinates,
                }
            })
            .collect()
    }
}

fn settle<P>(stream: &str, outcome: Result<Vec<RankedOpportunity<P>>>) -> StreamResult<P> {
    match outcome {
        Ok(entries) => StreamResult::Ready { entries },
        Err(e) => {
            warn!("{} stream failed: {}", stream, e);
            StreamResult::Failed {
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl OpportunityServiceTrait for OpportunityService {
    async fn rank(
        &self,
        commodity_code: &str,
        origin: Option<&str>,
    ) -> Result<OpportunityRecommendations> {
        let code = Self::validate_code(commodity_code)?;
        let origin = origin
            .map(normalize_country_code)
            .filter(|o| !o.is_empty());
        let prefix = code_prefix(code, self.config.prefix_length);

        debug!(
            "Ranking opportunities for {} (prefix {}, origin {:?})",
            code, prefix, origin
        );

        let (top_buyers, treaties, marketplace) = futures::join!(
            self.top_buyers(prefix, origin.as_deref()),
            self.treaty_recommendations(code, origin.as_deref()),
            self.marketplace_recommendations(prefix, origin.as_deref()),
        );

        Ok(OpportunityRecommendations {
            commodity_code: code.to_string(),
            code_prefix: prefix.to_string(),
            origin,
            top_buyers: settle("Top buyers", top_buyers),
            treaty_recommendations: settle("Treaty recommendations", treaties),
            marketplace_recommendations: settle("Marketplace demand", marketplace),
        })
    }

    async fn rank_with_timeout(
        &self,
        commodity_code: &str,
        origin: Option<&str>,
    ) -> Result<OpportunityRecommendations> {
        let deadline = self.config.request_timeout;
        match tokio::time::timeout(deadline, self.rank(commodity_code, origin)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Ranking {} timed out after {} ms",
                    commodity_code.trim(),
                    deadline.as_millis()
                );
                Err(Error::Timeout(deadline))
            }
        }
    }
}
