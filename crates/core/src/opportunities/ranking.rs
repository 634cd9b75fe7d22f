//! Aggregation and ordering for the three opportunity streams.
//!
//! Everything here is pure: the service feeds in raw source records and gets
//! back `(country_code, payload)` pairs already ordered and truncated. Ties on
//! the primary metric always fall back to the country code, ascending.

use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::opportunities_model::{
    MarketFlowRecord, MarketplaceDemand, MarketplaceDemandSignal, MarketplaceListing, TopBuyer,
    TreatyBenefit, TreatyDestinationRecord,
};
use crate::errors::Result;
use crate::geo::normalize_country_code;
use crate::preferences::{best_preference, PreferenceResolverTrait};

fn matches_prefix(code: &str, prefix: &str) -> bool {
    code.trim().starts_with(prefix)
}

fn matches_origin(record_origin: &str, origin: Option<&str>) -> bool {
    origin.map_or(true, |o| normalize_country_code(record_origin) == o)
}

/// Sorts by `metric`, then country code ascending, and keeps at most `limit`.
fn order_and_truncate<P, F>(
    mut entries: Vec<(String, P)>,
    limit: usize,
    metric: F,
) -> Vec<(String, P)>
where
    F: Fn(&P, &P) -> Ordering,
{
    entries.sort_by(|(code_a, a), (code_b, b)| metric(a, b).then_with(|| code_a.cmp(code_b)));
    entries.truncate(limit);
    entries
}

// ── Stream A: top buyers ─────────────────────────────────────────────────────

/// Per-destination volume totals for flows matching `prefix` (and `origin`).
pub fn aggregate_top_buyers(
    records: &[MarketFlowRecord],
    prefix: &str,
    origin: Option<&str>,
) -> Vec<(String, TopBuyer)> {
    let mut totals: BTreeMap<String, (f64, f64, usize)> = BTreeMap::new();

    for record in records {
        if !matches_prefix(&record.commodity_code, prefix)
            || !matches_origin(&record.origin, origin)
            || !record.volume.is_finite()
            || !record.value.is_finite()
        {
            continue;
        }
        let destination = normalize_country_code(&record.destination);
        if destination.is_empty() {
            continue;
        }
        let entry = totals.entry(destination).or_insert((0.0, 0.0, 0));
        entry.0 += record.volume;
        entry.1 += record.value;
        entry.2 += 1;
    }

    totals
        .into_iter()
        .map(|(destination, (volume, value, count))| {
            (
                destination,
                TopBuyer {
                    total_volume: volume,
                    average_value: value / count as f64,
                    record_count: count,
                },
            )
        })
        .collect()
}

/// Destinations by total volume, descending.
pub fn rank_top_buyers(
    records: &[MarketFlowRecord],
    prefix: &str,
    origin: Option<&str>,
    limit: usize,
) -> Vec<(String, TopBuyer)> {
    order_and_truncate(aggregate_top_buyers(records, prefix, origin), limit, |a, b| {
        b.total_volume.total_cmp(&a.total_volume)
    })
}

// ── Stream B: treaty recommendations ─────────────────────────────────────────

/// One benefit per destination that both names an agreement and resolves to at
/// least one preference for `commodity_code`.
///
/// When several origins reach the same destination the lowest tariff wins;
/// ties keep the first record seen.
pub fn select_treaty_destinations(
    records: &[TreatyDestinationRecord],
    commodity_code: &str,
    origin: Option<&str>,
    resolver: &dyn PreferenceResolverTrait,
) -> Result<Vec<(String, TreatyBenefit)>> {
    let mut selected: BTreeMap<String, TreatyBenefit> = BTreeMap::new();

    for record in records {
        if !matches_origin(&record.origin, origin) {
            continue;
        }
        let Some(agreement) = record.first_agreement() else {
            continue;
        };
        let destination = normalize_country_code(&record.destination);
        if destination.is_empty() {
            continue;
        }

        let preferences =
            resolver.resolve_preferences(commodity_code, &record.origin, &destination)?;
        let Some(best) = best_preference(&preferences) else {
            continue;
        };

        let benefit = TreatyBenefit {
            agreement: agreement.to_string(),
            tariff_rate: best.tariff_rate,
            regional_content: best.regional_content,
            in_force: best.applicable,
            preference_count: preferences.len(),
        };

        match selected.entry(destination) {
            Entry::Vacant(slot) => {
                slot.insert(benefit);
            }
            Entry::Occupied(mut slot) => {
                if benefit.tariff_rate < slot.get().tariff_rate {
                    slot.insert(benefit);
                }
            }
        }
    }

    Ok(selected.into_iter().collect())
}

/// Treaty destinations by effective tariff, ascending.
pub fn rank_treaty_destinations(
    records: &[TreatyDestinationRecord],
    commodity_code: &str,
    origin: Option<&str>,
    resolver: &dyn PreferenceResolverTrait,
    limit: usize,
) -> Result<Vec<(String, TreatyBenefit)>> {
    let selected = select_treaty_destinations(records, commodity_code, origin, resolver)?;
    Ok(order_and_truncate(selected, limit, |a, b| {
        a.tariff_rate.total_cmp(&b.tariff_rate)
    }))
}

// ── Stream C: marketplace demand ─────────────────────────────────────────────

/// Active buy listings matching `prefix`, grouped by requester country and
/// ordered by country code.
pub fn aggregate_demand_signals(
    listings: &[MarketplaceListing],
    prefix: &str,
) -> Vec<MarketplaceDemandSignal> {
    let mut signals: BTreeMap<String, MarketplaceDemandSignal> = BTreeMap::new();

    for listing in listings {
        if !listing.is_active_buy() || !matches_prefix(&listing.commodity_code, prefix) {
            continue;
        }
        let country = normalize_country_code(&listing.requester_country);
        if country.is_empty() {
            continue;
        }
        let signal = signals
            .entry(country.clone())
            .or_insert_with(|| MarketplaceDemandSignal {
                country,
                active_orders: 0,
                total_quantity: 0.0,
            });
        signal.active_orders += 1;
        if listing.quantity.is_finite() {
            signal.total_quantity += listing.quantity;
        }
    }

    signals.into_values().collect()
}

/// Requesting countries by active order count, descending. The exporting
/// country itself is left out.
pub fn rank_marketplace_demand(
    listings: &[MarketplaceListing],
    prefix: &str,
    origin: Option<&str>,
    limit: usize,
) -> Vec<(String, MarketplaceDemand)> {
    let demand = aggregate_demand_signals(listings, prefix)
        .iter()
        .filter(|signal| origin != Some(signal.country.as_str()))
        .map(|signal| (signal.country.clone(), MarketplaceDemand::from(signal)))
        .collect();
    order_and_truncate(demand, limit, |a, b| b.active_orders.cmp(&a.active_orders))
}
