//! Unit tests for the commodity classifier.

use super::*;
use crate::config::EngineConfig;
use crate::errors::{Error, ValidationError};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Helpers
// ============================================================================

fn service() -> ClassifierService {
    ClassifierService::with_embedded_catalog()
}

fn small_catalog() -> Arc<CommodityCatalog> {
    let json = r#"{"commodities": [
        {"code": "0805", "description": "Citrus fruit", "nativeDescription": "Agrios", "keywords": ["lemons"]},
        {"code": "080550", "description": "Lemons and limes", "keywords": []},
        {"code": "0201", "description": "Bovine meat, fresh", "keywords": ["beef"]}
    ]}"#;
    Arc::new(CommodityCatalog::from_json(json).unwrap())
}

// ============================================================================
// Empty and malformed input
// ============================================================================

#[test]
fn test_empty_and_whitespace_queries_return_none() {
    let service = service();
    assert!(service.classify("").unwrap().is_none());
    assert!(service.classify("   ").unwrap().is_none());
    assert!(service.classify("\t\n").unwrap().is_none());
}

#[test]
fn test_non_string_json_is_rejected_distinctly_from_no_match() {
    let service = service();

    for value in [json!(1001), json!(null), json!(["wheat"]), json!({"q": "wheat"})] {
        let err = service.classify_value(&value).unwrap_err();
        assert!(
            matches!(err, Error::Validation(ValidationError::NotAString(_))),
            "unexpected error for {}: {:?}",
            value,
            err
        );
    }

    assert!(service.classify_value(&json!("zzqx")).unwrap().is_none());
    assert_eq!(
        service.classify_value(&json!("1001")).unwrap().unwrap().code,
        "1001"
    );
}

#[test]
fn test_overlong_query_is_rejected() {
    let config = EngineConfig {
        max_query_length: 10,
        ..EngineConfig::default()
    };
    let service = ClassifierService::new(CommodityCatalog::embedded(), &config);
    let err = service.classify("a very long product name").unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::QueryTooLong { max: 10 })
    ));
}

#[test]
fn test_control_characters_are_rejected() {
    let err = service().classify("wheat\u{0007}").unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));
}

// ============================================================================
// Stage 1: code prefix
// ============================================================================

#[test]
fn test_numeric_code_returns_full_confidence() {
    let found = service().classify("1001").unwrap().unwrap();
    assert_eq!(found.code, "1001");
    assert_eq!(found.confidence, 1.0);
    assert_eq!(found.method, MatchMethod::CodePrefix);
    assert!(!found.description.is_empty());
}

#[test]
fn test_numeric_query_is_trimmed() {
    let found = service().classify("  100199 ").unwrap().unwrap();
    assert_eq!(found.code, "100199");
    assert_eq!(found.confidence, 1.0);
}

#[test]
fn test_five_digit_prefix_matches_first_subheading() {
    let found = service().classify("10011").unwrap().unwrap();
    assert_eq!(found.code, "100119");
    assert_eq!(found.confidence, 1.0);
}

#[test]
fn test_unknown_numeric_code_returns_none() {
    assert!(service().classify("9999").unwrap().is_none());
    assert!(service().classify("123").unwrap().is_none());
    assert!(service().classify("1234567").unwrap().is_none());
}

// ============================================================================
// Stage 2: description / keyword substring
// ============================================================================

#[test]
fn test_english_description_match() {
    let found = service().classify("Coffee").unwrap().unwrap();
    assert_eq!(found.code, "0901");
    assert_eq!(found.confidence, 0.85);
    assert_eq!(found.method, MatchMethod::Description);
}

#[test]
fn test_native_description_match() {
    let found = service().classify("trigo").unwrap().unwrap();
    assert_eq!(found.code, "1001");
    assert_eq!(found.confidence, 0.85);
}

#[test]
fn test_first_match_in_catalog_order_wins() {
    let service = ClassifierService::new(small_catalog(), &EngineConfig::default());
    // Both citrus entries contain "lemon"; the heading is declared first.
    let found = service.classify("lemon").unwrap().unwrap();
    assert_eq!(found.code, "0805");
}

#[test]
fn test_description_stage_beats_alias_stage() {
    // "corn" is an alias, but it also appears in the 1005 description.
    let found = service().classify("corn").unwrap().unwrap();
    assert_eq!(found.code, "1005");
    assert_eq!(found.method, MatchMethod::Description);
}

// ============================================================================
// Stage 3: alias table
// ============================================================================

#[test]
fn test_alias_contained_in_longer_query() {
    let found = service()
        .classify("Premium Argentine BEEF cuts for export")
        .unwrap()
        .unwrap();
    assert_eq!(found.code, "0201");
    assert_eq!(found.confidence, 0.9);
    assert_eq!(found.method, MatchMethod::Alias);
}

#[test]
fn test_alias_description_comes_from_catalog() {
    let found = service().classify("refurbished iphone lot").unwrap().unwrap();
    assert_eq!(found.code, "851713");
    assert_eq!(found.description, "Smartphones");
}

#[test]
fn test_alias_pointing_outside_catalog_is_no_match() {
    // The small catalog has no 851713 entry.
    let service = ClassifierService::new(small_catalog(), &EngineConfig::default());
    assert!(service.classify("used smartphone").unwrap().is_none());
}

#[test]
fn test_no_match_returns_none() {
    assert!(service().classify("quantum flux capacitor").unwrap().is_none());
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn test_suggest_lists_matches_in_priority_order() {
    let suggestions = service().suggest("wheat", 10).unwrap();
    let codes: Vec<&str> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["1001", "100119", "100199"]);
    assert!(suggestions.iter().all(|s| s.confidence == 0.85));
}

#[test]
fn test_suggest_respects_limit_and_empty_query() {
    let service = service();
    assert_eq!(service.suggest("wheat", 1).unwrap().len(), 1);
    assert!(service.suggest("  ", 5).unwrap().is_empty());
}

#[test]
fn test_suggest_appends_alias_matches_without_duplicates() {
    let suggestions = service().suggest("beef steak", 10).unwrap();
    let codes: Vec<&str> = suggestions.iter().map(|s| s.code.as_str()).collect();
    assert_eq!(codes, vec!["0201"]);
    assert_eq!(suggestions[0].method, MatchMethod::Alias);
}
