use super::commodities_model::{Classification, CommodityCode};
use crate::errors::Result;

/// Commodity reference lookups (prefix and substring queries).
pub trait CommodityCatalogTrait: Send + Sync {
    fn get(&self, code: &str) -> Option<CommodityCode>;
    /// First entry in catalog order whose code starts with `prefix`.
    fn find_by_prefix(&self, prefix: &str) -> Option<CommodityCode>;
    /// Entries whose text fields contain `text`, in catalog order.
    fn search(&self, text: &str) -> Vec<CommodityCode>;
}

/// Trait for commodity classification operations
pub trait ClassifierServiceTrait: Send + Sync {
    /// Resolves a free-text or numeric query to its best commodity code.
    ///
    /// `Ok(None)` means nothing matched; errors are reserved for malformed input.
    fn classify(&self, query: &str) -> Result<Option<Classification>>;

    /// Same as [`classify`](Self::classify) for untyped callers; non-string
    /// values are rejected.
    fn classify_value(&self, query: &serde_json::Value) -> Result<Option<Classification>>;

    /// All text and alias matches in priority order, up to `limit`.
    fn suggest(&self, query: &str, limit: usize) -> Result<Vec<Classification>>;
}
