//! Trade preferences module - bloc knowledge base and preference resolver.

mod preference_resolver;
mod preferences_model;
mod preferences_traits;
mod trade_bloc_registry;

pub use preference_resolver::PreferenceResolver;
pub use preferences_model::{
    best_preference, sort_by_tariff, ChapterRange, ContentRequirement, PreferenceRule, RuleScope,
    TradeBlock, TradePreference,
};
pub use preferences_traits::PreferenceResolverTrait;
pub use trade_bloc_registry::TradeBlocRegistry;

#[cfg(test)]
mod preference_resolver_tests;
