//! Unit tests for the trade preference resolver.

use super::*;
use crate::errors::{Error, ValidationError};

fn resolver() -> PreferenceResolver {
    PreferenceResolver::with_embedded_registry()
}

fn rule_ids(preferences: &[TradePreference]) -> Vec<&str> {
    preferences.iter().map(|p| p.rule_id.as_str()).collect()
}

#[test]
fn test_single_bloc_rule_gives_zero_tariff() {
    let prefs = resolver().resolve_preferences("1001", "AR", "BR").unwrap();
    assert_eq!(rule_ids(&prefs), vec!["MERCOSUR_INTRAZONE"]);
    assert_eq!(prefs[0].tariff_rate, 0.0);
    assert_eq!(prefs[0].regional_content, Some(60.0));
    assert!(prefs[0].applicable);
}

#[test]
fn test_countries_outside_every_bloc_get_nothing() {
    let prefs = resolver().resolve_preferences("1001", "RU", "TR").unwrap();
    assert!(prefs.is_empty());
}

#[test]
fn test_unmatched_pair_is_empty_not_error() {
    let prefs = resolver().resolve_preferences("8703", "AR", "JP").unwrap();
    assert!(prefs.is_empty());
}

#[test]
fn test_chapter_gated_bilateral_rule() {
    let resolver = resolver();

    let agri = resolver.resolve_preferences("100199", "AR", "MX").unwrap();
    assert_eq!(rule_ids(&agri), vec!["ACE_6"]);
    assert_eq!(agri[0].tariff_rate, 2.5);

    let industrial = resolver.resolve_preferences("8708", "AR", "MX").unwrap();
    assert!(industrial.is_empty());
}

#[test]
fn test_pending_inter_bloc_agreement_is_returned_as_not_applicable() {
    let prefs = resolver().resolve_preferences("0201", "DE", "UY").unwrap();
    assert_eq!(rule_ids(&prefs), vec!["EU_MERCOSUR"]);
    assert!(!prefs[0].applicable);
    assert_eq!(prefs[0].tariff_rate, 4.0);
}

#[test]
fn test_efta_excludes_agricultural_chapters() {
    let resolver = resolver();
    assert!(resolver.resolve_preferences("0406", "CH", "NO").unwrap().is_empty());
    let prefs = resolver.resolve_preferences("9018", "CH", "NO").unwrap();
    assert_eq!(rule_ids(&prefs), vec!["EFTA_CONVENTION"]);
}

#[test]
fn test_overlapping_blocs_return_all_in_declaration_order() {
    // Mexico and Peru share the Pacific Alliance and CPTPP.
    let prefs = resolver().resolve_preferences("8703", "MX", "PE").unwrap();
    assert_eq!(rule_ids(&prefs), vec!["PACIFIC_ALLIANCE", "CPTPP"]);
    assert_eq!(prefs[1].regional_content, Some(45.0));
}

#[test]
fn test_partial_reduction_pact_has_nonzero_tariff() {
    // Japan and China only share RCEP.
    let prefs = resolver().resolve_preferences("8517", "JP", "CN").unwrap();
    assert_eq!(rule_ids(&prefs), vec!["RCEP"]);
    assert_eq!(prefs[0].tariff_rate, 3.5);

    let best = best_preference(&prefs).unwrap();
    assert_eq!(best.rule_id, "RCEP");
}

#[test]
fn test_vehicle_content_requirement_depends_on_chapter() {
    let resolver = resolver();
    let cars = resolver.resolve_preferences("8703", "US", "CA").unwrap();
    assert_eq!(cars[0].regional_content, Some(75.0));
    let wheat = resolver.resolve_preferences("1001", "US", "CA").unwrap();
    assert_eq!(wheat[0].regional_content, Some(60.0));
}

#[test]
fn test_bloc_partner_rule_matches_both_directions() {
    let resolver = resolver();
    let out = resolver.resolve_preferences("1201", "BR", "IN").unwrap();
    let back = resolver.resolve_preferences("1201", "IN", "BR").unwrap();
    assert_eq!(rule_ids(&out), vec!["MERCOSUR_INDIA"]);
    assert_eq!(out, back);
}

#[test]
fn test_country_codes_are_normalized() {
    let prefs = resolver().resolve_preferences("1001", " ar", "br ").unwrap();
    assert_eq!(rule_ids(&prefs), vec!["MERCOSUR_INTRAZONE"]);
}

#[test]
fn test_same_country_is_not_an_import() {
    assert!(resolver().resolve_preferences("1001", "AR", "AR").unwrap().is_empty());
}

#[test]
fn test_malformed_commodity_code_is_rejected() {
    let err = resolver().resolve_preferences("X1", "AR", "BR").unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MalformedCommodityCode(_))
    ));
}

#[test]
fn test_blocs_for_country_through_trait() {
    let blocs = resolver().blocs_for_country("cl");
    let ids: Vec<&str> = blocs.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["PACIFIC_ALLIANCE", "CPTPP"]);
}
