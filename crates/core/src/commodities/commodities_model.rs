//! Commodity classification domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Nesting level of a commodity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeLevel {
    /// 2 digits
    Chapter,
    /// 4 digits
    Heading,
    /// 6 digits
    Subheading,
}

impl CodeLevel {
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            2 => Some(CodeLevel::Chapter),
            4 => Some(CodeLevel::Heading),
            6 => Some(CodeLevel::Subheading),
            _ => None,
        }
    }
}

/// Reference entry of the commodity catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommodityCode {
    pub code: String,
    /// English description
    pub description: String,
    /// Description in the marketplace's native language
    #[serde(default)]
    pub native_description: Option<String>,
    /// Free-text keywords used for substring matching
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CommodityCode {
    pub fn level(&self) -> Option<CodeLevel> {
        CodeLevel::from_len(self.code.len())
    }

    /// Chapter number (first two digits).
    pub fn chapter(&self) -> Result<u8> {
        chapter_of(&self.code)
    }

    /// Four-digit heading, or the whole code when it is a chapter.
    pub fn heading(&self) -> &str {
        code_prefix(&self.code, 4)
    }
}

/// Parses the chapter number out of any commodity code string.
pub fn chapter_of(code: &str) -> Result<u8> {
    let code = code.trim();
    let head = code
        .get(..2)
        .filter(|h| h.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| ValidationError::MalformedCommodityCode(code.to_string()))?;
    Ok(head.parse::<u8>()?)
}

/// First `len` characters of a code, or the whole code when shorter.
pub fn code_prefix(code: &str, len: usize) -> &str {
    code.get(..len).unwrap_or(code)
}

/// Classifier stage that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMethod {
    CodePrefix,
    Description,
    Alias,
}

/// Result of classifying a free-text or numeric query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub code: String,
    pub description: String,
    /// Higher means more certain; fixed per matching stage.
    pub confidence: f64,
    pub method: MatchMethod,
}

impl Classification {
    pub fn new(entry: &CommodityCode, confidence: f64, method: MatchMethod) -> Self {
        Self {
            code: entry.code.clone(),
            description: entry.description.clone(),
            confidence,
            method,
        }
    }
}
