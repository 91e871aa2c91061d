use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resolved (level, primary, sub) classification triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub level: String,
    pub primary: String,
    pub sub: String,
}

impl Classification {
    pub fn new(
        level: impl Into<String>,
        primary: impl Into<String>,
        sub: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            primary: primary.into(),
            sub: sub.into(),
        }
    }
}

/// One practice-problem entry from the catalog document.
///
/// Only the fields the curation stages read or write are modeled. Everything
/// else the source document carries rides along in `extra`, so a load/persist
/// round trip never drops data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Legacy single-field classification, consulted only as a fallback
    /// signal when no valid triple exists.
    #[serde(rename = "algorithmType", skip_serializing_if = "Option::is_none")]
    pub algorithm_type: Option<String>,
    #[serde(rename = "patternLevel", skip_serializing_if = "Option::is_none")]
    pub pattern_level: Option<String>,
    #[serde(rename = "primaryPattern", skip_serializing_if = "Option::is_none")]
    pub primary_pattern: Option<String>,
    #[serde(rename = "subPattern", skip_serializing_if = "Option::is_none")]
    pub sub_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "shortPatternReason", skip_serializing_if = "Option::is_none")]
    pub short_pattern_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_complexity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_complexity: Option<String>,
    #[serde(rename = "patternSignals", skip_serializing_if = "Option::is_none")]
    pub pattern_signals: Option<Vec<String>>,
    #[serde(rename = "edgeCases", skip_serializing_if = "Option::is_none")]
    pub edge_cases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    /// Unmodeled document fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Problem {
    /// Create a bare record with only the identifying fields set.
    pub fn new(id: u64, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
            difficulty: None,
            status: None,
            algorithm_type: None,
            pattern_level: None,
            primary_pattern: None,
            sub_pattern: None,
            tags: None,
            short_pattern_reason: None,
            time_complexity: None,
            space_complexity: None,
            pattern_signals: None,
            edge_cases: None,
            problem_statement: None,
            extra: Map::new(),
        }
    }

    /// The record's classification triple, when all three fields are present.
    pub fn classification(&self) -> Option<Classification> {
        Some(Classification {
            level: self.pattern_level.clone()?,
            primary: self.primary_pattern.clone()?,
            sub: self.sub_pattern.clone()?,
        })
    }

    /// Overwrite the classification fields with a resolved triple.
    pub fn set_classification(&mut self, classification: &Classification) {
        self.pattern_level = Some(classification.level.clone());
        self.primary_pattern = Some(classification.primary.clone());
        self.sub_pattern = Some(classification.sub.clone());
    }
}

/// Generate a URL-friendly slug from a title.
pub fn generate_slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
