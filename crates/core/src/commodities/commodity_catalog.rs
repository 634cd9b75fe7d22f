//! JSON-driven commodity catalog.
//!
//! Loads `commodity_catalog.json` at compile time via `include_str!` and builds
//! the code index once via `lazy_static`. Catalog order is preserved: every
//! "first match" lookup walks entries in declaration order.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Deserialize;

use super::commodities_model::{CodeLevel, CommodityCode};
use super::commodities_traits::CommodityCatalogTrait;
use crate::errors::{Error, Result};

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CatalogFile {
    commodities: Vec<CommodityCode>,
}

// ── Catalog with pre-built indexes ───────────────────────────────────────────

/// Immutable, ordered commodity catalog.
#[derive(Debug, Clone)]
pub struct CommodityCatalog {
    entries: Vec<CommodityCode>,
    /// code → position in `entries`
    index_by_code: HashMap<String, usize>,
    /// Lower-cased descriptions and keywords, parallel to `entries`
    search_fields: Vec<Vec<String>>,
}

lazy_static! {
    static ref EMBEDDED: Arc<CommodityCatalog> = Arc::new(
        CommodityCatalog::from_json(include_str!("commodity_catalog.json"))
            .expect("commodity_catalog.json must be valid")
    );
}

impl CommodityCatalog {
    /// The catalog shipped with the crate, parsed once per process.
    pub fn embedded() -> Arc<CommodityCatalog> {
        Arc::clone(&EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_entries(file.commodities)
    }

    /// Builds a catalog, rejecting malformed or duplicate codes.
    pub fn from_entries(entries: Vec<CommodityCode>) -> Result<Self> {
        let mut index_by_code = HashMap::with_capacity(entries.len());
        let mut search_fields = Vec::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            if !entry.code.chars().all(|c| c.is_ascii_digit())
                || CodeLevel::from_len(entry.code.len()).is_none()
            {
                return Err(Error::Catalog(format!(
                    "invalid commodity code '{}'",
                    entry.code
                )));
            }
            if index_by_code.insert(entry.code.clone(), position).is_some() {
                return Err(Error::Catalog(format!(
                    "duplicate commodity code '{}'",
                    entry.code
                )));
            }

            let mut fields = vec![entry.description.to_lowercase()];
            if let Some(native) = &entry.native_description {
                fields.push(native.to_lowercase());
            }
            fields.extend(entry.keywords.iter().map(|k| k.to_lowercase()));
            search_fields.push(fields);
        }

        Ok(Self {
            entries,
            index_by_code,
            search_fields,
        })
    }

    pub fn entries(&self) -> &[CommodityCode] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&CommodityCode> {
        self.index_by_code.get(code).map(|&i| &self.entries[i])
    }

    /// First entry, in catalog order, whose code starts with `prefix`.
    pub fn first_with_prefix(&self, prefix: &str) -> Option<&CommodityCode> {
        self.entries.iter().find(|e| e.code.starts_with(prefix))
    }

    /// Entries whose description, native description or keywords contain
    /// `text` (case-insensitive), in catalog order.
    pub fn matching_text(&self, text: &str) -> Vec<&CommodityCode> {
        let needle = text.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .zip(&self.search_fields)
            .filter(|(_, fields)| fields.iter().any(|f| f.contains(&needle)))
            .map(|(entry, _)| entry)
            .collect()
    }
}

impl CommodityCatalogTrait for CommodityCatalog {
    fn get(&self, code: &str) -> Option<CommodityCode> {
        CommodityCatalog::get(self, code).cloned()
    }

    fn find_by_prefix(&self, prefix: &str) -> Option<CommodityCode> {
        self.first_with_prefix(prefix).cloned()
    }

    fn search(&self, text: &str) -> Vec<CommodityCode> {
        self.matching_text(text).into_iter().cloned().collect()
    }
}
