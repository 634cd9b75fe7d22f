//! Rule-based commodity classifier.
//!
//! Stages run in strict priority order and the first one that produces a match
//! wins:
//! 1. Numeric code prefix (4 to 6 digits) - confidence 1.0
//! 2. Description/keyword substring - confidence 0.85
//! 3. Colloquial alias table - confidence 0.9
//!
//! Confidence is a constant per stage. Callers should only rely on "higher is
//! more certain" so the matcher can later be swapped for a probabilistic one.

use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::commodities_model::{Classification, MatchMethod};
use super::commodities_traits::{ClassifierServiceTrait, CommodityCatalogTrait};
use super::commodity_aliases::{all_aliases, find_alias};
use super::commodity_catalog::CommodityCatalog;
use crate::config::EngineConfig;
use crate::constants::{
    CONFIDENCE_ALIAS_MATCH, CONFIDENCE_CODE_MATCH, CONFIDENCE_DESCRIPTION_MATCH,
};
use crate::errors::{Result, ValidationError};

lazy_static! {
    static ref CODE_QUERY: Regex = Regex::new(r"^[0-9]{4,6}$").expect("valid code regex");
}

pub struct ClassifierService {
    catalog: Arc<dyn CommodityCatalogTrait>,
    max_query_length: usize,
}

impl ClassifierService {
    pub fn new(catalog: Arc<dyn CommodityCatalogTrait>, config: &EngineConfig) -> Self {
        Self {
            catalog,
            max_query_length: config.max_query_length,
        }
    }

    /// Classifier over the embedded catalog with default settings.
    pub fn with_embedded_catalog() -> Self {
        Self::new(CommodityCatalog::embedded(), &EngineConfig::default())
    }

    /// Trims and validates a query. `None` means there is nothing to classify.
    fn prepare<'q>(&self, query: &'q str) -> Result<Option<&'q str>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > self.max_query_length {
            return Err(ValidationError::QueryTooLong {
                max: self.max_query_length,
            }
            .into());
        }
        if trimmed.chars().any(|c| c.is_control() && !c.is_whitespace()) {
            return Err(ValidationError::InvalidInput(
                "query contains control characters".to_string(),
            )
            .into());
        }
        Ok(Some(trimmed))
    }

    fn match_code(&self, query: &str) -> Option<Classification> {
        if !CODE_QUERY.is_match(query) {
            return None;
        }
        self.catalog.find_by_prefix(query).map(|entry| {
            Classification::new(&entry, CONFIDENCE_CODE_MATCH, MatchMethod::CodePrefix)
        })
    }

    fn match_description(&self, query: &str) -> Option<Classification> {
        self.catalog.search(query).first().map(|entry| {
            Classification::new(entry, CONFIDENCE_DESCRIPTION_MATCH, MatchMethod::Description)
        })
    }

    fn match_alias(&self, lowered: &str) -> Option<Classification> {
        let (alias, code) = find_alias(lowered)?;
        let entry = self.catalog.get(code)?;
        debug!("Alias '{}' resolved to commodity {}", alias, code);
        Some(Classification::new(
            &entry,
            CONFIDENCE_ALIAS_MATCH,
            MatchMethod::Alias,
        ))
    }
}

impl ClassifierServiceTrait for ClassifierService {
    fn classify(&self, query: &str) -> Result<Option<Classification>> {
        let Some(query) = self.prepare(query)? else {
            return Ok(None);
        };

        if let Some(found) = self.match_code(query) {
            debug!("Classified '{}' by code prefix as {}", query, found.code);
            return Ok(Some(found));
        }
        if let Some(found) = self.match_description(query) {
            debug!("Classified '{}' by description as {}", query, found.code);
            return Ok(Some(found));
        }
        let found = self.match_alias(&query.to_lowercase());
        if found.is_none() {
            debug!("No classification found for '{}'", query);
        }
        Ok(found)
    }

    fn classify_value(&self, query: &serde_json::Value) -> Result<Option<Classification>> {
        match query {
            serde_json::Value::String(text) => self.classify(text),
            other => Err(ValidationError::NotAString(json_kind(other).to_string()).into()),
        }
    }

    fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Classification>> {
        let Some(query) = self.prepare(query)? else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        if let Some(found) = self.match_code(query) {
            seen.insert(found.code.clone());
            suggestions.push(found);
        }

        for entry in self.catalog.search(query) {
            if seen.insert(entry.code.clone()) {
                suggestions.push(Classification::new(
                    &entry,
                    CONFIDENCE_DESCRIPTION_MATCH,
                    MatchMethod::Description,
                ));
            }
        }

        let lowered = query.to_lowercase();
        for (_, code) in all_aliases(&lowered) {
            if !seen.insert(code.to_string()) {
                continue;
            }
            if let Some(entry) = self.catalog.get(code) {
                suggestions.push(Classification::new(
                    &entry,
                    CONFIDENCE_ALIAS_MATCH,
                    MatchMethod::Alias,
                ));
            }
        }

        suggestions.truncate(limit);
        Ok(suggestions)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
