//! Rule-driven trade preference resolver.

use std::sync::Arc;

use log::debug;

use super::preferences_model::{TradeBlock, TradePreference};
use super::preferences_traits::PreferenceResolverTrait;
use super::trade_bloc_registry::TradeBlocRegistry;
use crate::commodities::chapter_of;
use crate::errors::Result;
use crate::geo::normalize_country_code;

/// Walks the ordered rule list of a [`TradeBlocRegistry`].
///
/// Holds no per-request state: content requirements depend on chapter ranges,
/// so every call recomputes from the registry.
pub struct PreferenceResolver {
    registry: Arc<TradeBlocRegistry>,
}

impl PreferenceResolver {
    pub fn new(registry: Arc<TradeBlocRegistry>) -> Self {
        Self { registry }
    }

    pub fn with_embedded_registry() -> Self {
        Self::new(TradeBlocRegistry::embedded())
    }

    pub fn registry(&self) -> &TradeBlocRegistry {
        &self.registry
    }
}

impl PreferenceResolverTrait for PreferenceResolver {
    fn resolve_preferences(
        &self,
        commodity_code: &str,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<TradePreference>> {
        let chapter = chapter_of(commodity_code)?;
        let origin = normalize_country_code(origin);
        let destination = normalize_country_code(destination);

        if origin.is_empty() || destination.is_empty() || origin == destination {
            return Ok(Vec::new());
        }

        let preferences: Vec<TradePreference> = self
            .registry
            .rules()
            .iter()
            .filter(|rule| rule.covers_chapter(chapter))
            .filter(|rule| self.registry.scope_matches(&rule.scope, &origin, &destination))
            .map(|rule| rule.to_preference(chapter))
            .collect();

        debug!(
            "Resolved {} preference(s) for chapter {:02} {} -> {}",
            preferences.len(),
            chapter,
            origin,
            destination
        );
        Ok(preferences)
    }

    fn blocs_for_country(&self, country: &str) -> Vec<TradeBlock> {
        self.registry
            .blocs_for_country(&normalize_country_code(country))
            .into_iter()
            .cloned()
            .collect()
    }
}
