//! Commodities module - catalog, alias table and classifier.

mod classifier_service;
mod commodities_model;
mod commodities_traits;
mod commodity_aliases;
mod commodity_catalog;

pub use classifier_service::ClassifierService;
pub use commodities_model::{
    chapter_of, code_prefix, Classification, CodeLevel, CommodityCode, MatchMethod,
};
pub use commodities_traits::{ClassifierServiceTrait, CommodityCatalogTrait};
pub use commodity_aliases::COMMODITY_ALIASES;
pub use commodity_catalog::CommodityCatalog;

#[cfg(test)]
mod classifier_service_tests;
