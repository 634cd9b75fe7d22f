//! Opportunity ranking domain models.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::geo::Coordinates;

// ── External inputs ──────────────────────────────────────────────────────────

/// Historical trade flow between two countries for one commodity code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketFlowRecord {
    pub origin: String,
    pub destination: String,
    pub commodity_code: String,
    pub year: i32,
    /// Traded quantity (metric tons)
    pub volume: f64,
    /// Traded value (USD)
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingType {
    Buy,
    Sell,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Buy => "BUY",
            ListingType::Sell => "SELL",
        }
    }
}

impl FromStr for ListingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(ListingType::Buy),
            "SELL" => Ok(ListingType::Sell),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown listing type '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Active,
    Closed,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "ACTIVE",
            ListingStatus::Closed => "CLOSED",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(ListingStatus::Active),
            "CLOSED" => Ok(ListingStatus::Closed),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown listing status '{}'",
                other
            ))),
        }
    }
}

/// Marketplace listing as stored by the listings layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceListing {
    pub id: String,
    pub requester_country: String,
    pub commodity_code: String,
    pub listing_type: ListingType,
    pub status: ListingStatus,
    pub quantity: f64,
}

impl MarketplaceListing {
    pub fn is_active_buy(&self) -> bool {
        self.listing_type == ListingType::Buy && self.status == ListingStatus::Active
    }
}

/// Active buy-side demand from one country for a commodity prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceDemandSignal {
    pub country: String,
    pub active_orders: u32,
    pub total_quantity: f64,
}

/// A destination the data source records as covered by named agreements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatyDestinationRecord {
    pub origin: String,
    pub destination: String,
    /// Agreement names; empty means no identifiable benefit
    pub agreements: Vec<String>,
}

impl TreatyDestinationRecord {
    /// First non-blank agreement name.
    pub fn first_agreement(&self) -> Option<&str> {
        self.agreements
            .iter()
            .map(|a| a.trim())
            .find(|a| !a.is_empty())
    }
}

// ── Stream payloads ──────────────────────────────────────────────────────────

/// Macro demand: historical imports from the origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopBuyer {
    pub total_volume: f64,
    pub average_value: f64,
    pub record_count: usize,
}

/// Treaty favorability of a destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreatyBenefit {
    /// First agreement recorded for the destination
    pub agreement: String,
    /// Lowest resolved tariff, in percent
    pub tariff_rate: f64,
    pub regional_content: Option<f64>,
    /// False when the lowest-tariff agreement is still pending
    pub in_force: bool,
    /// Number of preferences resolved for the pair
    pub preference_count: usize,
}

/// Live marketplace demand of a country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceDemand {
    pub active_orders: u32,
    pub total_quantity: f64,
}

impl From<&MarketplaceDemandSignal> for MarketplaceDemand {
    fn from(signal: &MarketplaceDemandSignal) -> Self {
        Self {
            active_orders: signal.active_orders,
            total_quantity: signal.total_quantity,
        }
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

/// One ranked destination of a stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedOpportunity<P> {
    /// 1-based, dense over the returned entries
    pub rank: usize,
    pub country_name: String,
    pub country_code: String,
    #[serde(flatten)]
    pub payload: P,
    /// `Coordinates::UNKNOWN` when the country cannot be mapped
    pub coordinates: Coordinates,
}

/// Outcome of one stream. `Ready` with no entries means "no data";
/// `Failed` means the lookup itself failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StreamResult<P> {
    Ready { entries: Vec<RankedOpportunity<P>> },
    Failed { message: String },
}

impl<P> StreamResult<P> {
    pub fn entries(&self) -> &[RankedOpportunity<P>] {
        match self {
            StreamResult::Ready { entries } => entries,
            StreamResult::Failed { .. } => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StreamResult::Failed { .. })
    }

    /// Ready and empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, StreamResult::Ready { entries } if entries.is_empty())
    }
}

/// The three independent recommendation lists for one commodity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRecommendations {
    pub commodity_code: String,
    /// Prefix stream records were matched against
    pub code_prefix: String,
    pub origin: Option<String>,
    pub top_buyers: StreamResult<TopBuyer>,
    pub treaty_recommendations: StreamResult<TreatyBenefit>,
    pub marketplace_recommendations: StreamResult<MarketplaceDemand>,
}
