//! Colloquial product names mapped to commodity codes.
//!
//! Checked in declaration order; the first alias contained in the query wins,
//! so longer, more specific aliases are listed before the words they contain.

pub const COMMODITY_ALIASES: &[(&str, &str)] = &[
    ("smartphone", "851713"),
    ("cell phone", "851713"),
    ("cellphone", "851713"),
    ("iphone", "851713"),
    ("laptop", "847130"),
    ("steak", "0201"),
    ("beef", "0201"),
    ("poultry", "0207"),
    ("soy", "1201"),
    ("corn", "1005"),
    ("cotton", "5201"),
    ("lemon", "0805"),
    ("orange", "0805"),
    ("crude", "2709"),
    ("lumber", "4403"),
    ("makeup", "3304"),
    ("car parts", "8708"),
    ("sedan", "8703"),
    ("suv", "8703"),
];

/// First alias (table order) whose key occurs in the already lower-cased query.
pub fn find_alias(lowered_query: &str) -> Option<(&'static str, &'static str)> {
    COMMODITY_ALIASES
        .iter()
        .find(|(alias, _)| lowered_query.contains(alias))
        .copied()
}

/// Every alias whose key occurs in the lower-cased query, in table order.
pub fn all_aliases(lowered_query: &str) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
    COMMODITY_ALIASES
        .iter()
        .filter(move |(alias, _)| lowered_query.contains(alias))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commodities::CommodityCatalog;

    #[test]
    fn test_every_alias_targets_a_cataloged_code() {
        let catalog = CommodityCatalog::embedded();
        for (alias, code) in COMMODITY_ALIASES {
            assert!(
                catalog.get(code).is_some(),
                "alias '{}' points to unknown code {}",
                alias,
                code
            );
        }
    }

    #[test]
    fn test_first_alias_in_table_order_wins() {
        // "steak" precedes "beef" in the table
        assert_eq!(find_alias("beef steak sandwich"), Some(("steak", "0201")));
        assert_eq!(find_alias("soy and corn blend").map(|a| a.1), Some("1201"));
        assert_eq!(find_alias("granite"), None);
    }
}
