//! JSON-driven trade bloc knowledge base.
//!
//! Loads `trade_agreements.json` at compile time via `include_str!` and builds
//! the country → blocs index once via `lazy_static`. Blocs and rules keep their
//! declaration order.

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Deserialize;

use super::preferences_model::{PreferenceRule, RuleScope, TradeBlock};
use crate::errors::{Error, Result};

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AgreementsFile {
    blocs: Vec<TradeBlock>,
    rules: Vec<PreferenceRule>,
}

// ── Registry with pre-built indexes ──────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TradeBlocRegistry {
    blocs: Vec<TradeBlock>,
    rules: Vec<PreferenceRule>,
    /// bloc id → position in `blocs`
    bloc_by_id: HashMap<String, usize>,
    /// country → positions in `blocs`, in declaration order
    blocs_by_country: HashMap<String, Vec<usize>>,
}

lazy_static! {
    static ref EMBEDDED: Arc<TradeBlocRegistry> = Arc::new(
        TradeBlocRegistry::from_json(include_str!("trade_agreements.json"))
            .expect("trade_agreements.json must be valid")
    );
}

impl TradeBlocRegistry {
    /// The knowledge base shipped with the crate, parsed once per process.
    pub fn embedded() -> Arc<TradeBlocRegistry> {
        Arc::clone(&EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: AgreementsFile = serde_json::from_str(json)?;
        Self::new(file.blocs, file.rules)
    }

    /// Builds the indexes and checks that every rule references known blocs.
    pub fn new(blocs: Vec<TradeBlock>, rules: Vec<PreferenceRule>) -> Result<Self> {
        let mut bloc_by_id = HashMap::with_capacity(blocs.len());
        let mut blocs_by_country: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, bloc) in blocs.iter().enumerate() {
            if bloc_by_id.insert(bloc.id.clone(), position).is_some() {
                return Err(Error::Catalog(format!("duplicate trade bloc '{}'", bloc.id)));
            }
            for member in &bloc.members {
                let entry = blocs_by_country.entry(member.clone()).or_default();
                if !entry.contains(&position) {
                    entry.push(position);
                }
            }
        }

        for rule in &rules {
            let referenced: Vec<&String> = match &rule.scope {
                RuleScope::Bloc { bloc } | RuleScope::BlocPartner { bloc, .. } => vec![bloc],
                RuleScope::InterBloc { blocs } => blocs.iter().collect(),
                RuleScope::Bilateral { .. } => vec![],
            };
            if let Some(missing) = referenced.iter().find(|b| !bloc_by_id.contains_key(**b)) {
                return Err(Error::Catalog(format!(
                    "rule '{}' references unknown bloc '{}'",
                    rule.id, missing
                )));
            }
        }

        Ok(Self {
            blocs,
            rules,
            bloc_by_id,
            blocs_by_country,
        })
    }

    pub fn blocs(&self) -> &[TradeBlock] {
        &self.blocs
    }

    pub fn rules(&self) -> &[PreferenceRule] {
        &self.rules
    }

    pub fn get(&self, bloc_id: &str) -> Option<&TradeBlock> {
        self.bloc_by_id.get(bloc_id).map(|&i| &self.blocs[i])
    }

    /// Blocs the country belongs to, in declaration order.
    pub fn blocs_for_country(&self, country: &str) -> Vec<&TradeBlock> {
        self.blocs_by_country
            .get(country)
            .map(|positions| positions.iter().map(|&i| &self.blocs[i]).collect())
            .unwrap_or_default()
    }

    pub fn is_member(&self, country: &str, bloc_id: &str) -> bool {
        match (self.blocs_by_country.get(country), self.bloc_by_id.get(bloc_id)) {
            (Some(positions), Some(bloc)) => positions.contains(bloc),
            _ => false,
        }
    }

    /// Whether the two countries share at least one bloc.
    pub fn are_partners(&self, a: &str, b: &str) -> bool {
        match (self.blocs_by_country.get(a), self.blocs_by_country.get(b)) {
            (Some(left), Some(right)) => left.iter().any(|i| right.contains(i)),
            _ => false,
        }
    }

    /// Whether the ordered pair falls inside the rule's country scope.
    pub fn scope_matches(&self, scope: &RuleScope, origin: &str, destination: &str) -> bool {
        match scope {
            RuleScope::Bloc { bloc } => {
                self.is_member(origin, bloc) && self.is_member(destination, bloc)
            }
            RuleScope::Bilateral { countries: [a, b] } => {
                (origin == a && destination == b) || (origin == b && destination == a)
            }
            RuleScope::BlocPartner { bloc, partner } => {
                (self.is_member(origin, bloc) && destination == partner)
                    || (origin == partner && self.is_member(destination, bloc))
            }
            RuleScope::InterBloc { blocs: [a, b] } => {
                (self.is_member(origin, a) && self.is_member(destination, b))
                    || (self.is_member(origin, b) && self.is_member(destination, a))
            }
        }
    }
}
