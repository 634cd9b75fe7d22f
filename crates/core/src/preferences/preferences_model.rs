//! Trade bloc and preference domain models.

use serde::{Deserialize, Serialize};

/// A named group of countries granting each other preferential treatment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeBlock {
    pub id: String,
    pub name: String,
    /// ISO 3166-1 alpha-2 member codes
    pub members: Vec<String>,
    pub benefit_summary: String,
}

impl TradeBlock {
    pub fn has_member(&self, country: &str) -> bool {
        self.members.iter().any(|m| m == country)
    }
}

/// Inclusive commodity chapter range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRange {
    pub from: u8,
    pub to: u8,
}

impl ChapterRange {
    pub fn contains(&self, chapter: u8) -> bool {
        (self.from..=self.to).contains(&chapter)
    }
}

/// Regional content percentage demanded for a chapter range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequirement {
    pub from_chapter: u8,
    pub to_chapter: u8,
    pub percent: f64,
}

/// Which country pairs a rule covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleScope {
    /// Both countries are members of the bloc.
    Bloc { bloc: String },
    /// The unordered pair equals `countries`.
    Bilateral { countries: [String; 2] },
    /// One country is a member of the bloc, the other is `partner`.
    BlocPartner { bloc: String, partner: String },
    /// One country is in each of the two blocs.
    InterBloc { blocs: [String; 2] },
}

/// One entry of the ordered preference rule list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRule {
    pub id: String,
    pub agreement: String,
    pub scope: RuleScope,
    /// Only these chapters qualify; every chapter when absent
    #[serde(default)]
    pub chapters: Option<ChapterRange>,
    pub tariff_rate: f64,
    /// First range containing the chapter wins
    #[serde(default)]
    pub regional_content: Vec<ContentRequirement>,
    #[serde(default = "default_in_force")]
    pub in_force: bool,
    pub note: String,
}

fn default_in_force() -> bool {
    true
}

impl PreferenceRule {
    pub fn covers_chapter(&self, chapter: u8) -> bool {
        self.chapters.map_or(true, |range| range.contains(chapter))
    }

    pub fn content_requirement_for(&self, chapter: u8) -> Option<f64> {
        self.regional_content
            .iter()
            .find(|req| (req.from_chapter..=req.to_chapter).contains(&chapter))
            .map(|req| req.percent)
    }

    pub fn to_preference(&self, chapter: u8) -> TradePreference {
        TradePreference {
            rule_id: self.id.clone(),
            agreement: self.agreement.clone(),
            tariff_rate: self.tariff_rate,
            regional_content: self.content_requirement_for(chapter),
            applicable: self.in_force,
            note: self.note.clone(),
        }
    }
}

/// A preferential treatment applying to one (commodity, origin, destination).
///
/// Derived on demand and never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradePreference {
    pub rule_id: String,
    pub agreement: String,
    /// Percent duty under this agreement
    pub tariff_rate: f64,
    /// Minimum regional content percentage, when the agreement demands one
    pub regional_content: Option<f64>,
    /// False for signed-but-pending agreements
    pub applicable: bool,
    pub note: String,
}

/// Lowest-tariff preference whether or not it is in force yet, ties resolved
/// by declaration order.
pub fn best_preference(preferences: &[TradePreference]) -> Option<&TradePreference> {
    preferences
        .iter()
        .reduce(|best, p| if p.tariff_rate < best.tariff_rate { p } else { best })
}

/// Copy of `preferences` sorted by tariff ascending (stable).
pub fn sort_by_tariff(preferences: &[TradePreference]) -> Vec<TradePreference> {
    let mut sorted = preferences.to_vec();
    sorted.sort_by(|a, b| a.tariff_rate.total_cmp(&b.tariff_rate));
    sorted
}
