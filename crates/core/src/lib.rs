//! Tradewise Core - commodity classification, trade preferences and
//! destination ranking.
//!
//! This crate holds the domain logic of the recommendation engine. It is
//! storage-agnostic: the ranking engine reads its sources through the
//! repository traits in [`opportunities`], implemented by the
//! `storage-sqlite` crate.

pub mod commodities;
pub mod config;
pub mod constants;
pub mod errors;
pub mod geo;
pub mod opportunities;
pub mod preferences;

// Re-export the public services
pub use commodities::ClassifierService;
pub use config::EngineConfig;
pub use opportunities::OpportunityService;
pub use preferences::PreferenceResolver;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
