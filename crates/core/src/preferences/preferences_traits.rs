use super::preferences_model::{TradeBlock, TradePreference};
use crate::errors::Result;

/// Trait for trade preference resolution
pub trait PreferenceResolverTrait: Send + Sync {
    /// Every preference applying to the commodity between the two countries,
    /// in rule declaration order. An empty list is a normal outcome.
    fn resolve_preferences(
        &self,
        commodity_code: &str,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<TradePreference>>;

    /// Blocs the country belongs to.
    fn blocs_for_country(&self, country: &str) -> Vec<TradeBlock>;
}
