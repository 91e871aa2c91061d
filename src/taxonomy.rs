use serde::{Deserialize, Serialize};

use crate::error::{CuratorError, Result};

/// The three-level classification hierarchy: level -> primary pattern ->
/// sub-pattern.
///
/// Levels, primaries, and sub-patterns are explicitly ordered sequences.
/// Every "first entry" rule in the curation stages means declaration order
/// of the configuration, never incidental map iteration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    levels: Vec<TaxonomyLevel>,
}

/// One top-tier category and its primary patterns, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyLevel {
    pub name: String,
    pub primaries: Vec<TaxonomyPrimary>,
}

/// One second-tier category and its sub-patterns, in declaration order.
/// The first sub-pattern is the structural default for the primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyPrimary {
    pub name: String,
    pub sub_patterns: Vec<String>,
}

impl Taxonomy {
    /// Build a taxonomy, failing fast on a malformed hierarchy.
    ///
    /// Rejected shapes: no levels, a level with no primaries, a primary with
    /// no sub-patterns, duplicate level names, a primary name appearing under
    /// more than one level, and a sub-pattern repeated within one primary's
    /// list. The same sub-pattern string under two different primaries is
    /// legal; validity is always scoped to the parent primary.
    pub fn new(levels: Vec<TaxonomyLevel>) -> Result<Self> {
        if levels.is_empty() {
            return Err(CuratorError::Config(
                "taxonomy must declare at least one level".to_string(),
            ));
        }

        let mut seen_levels = Vec::new();
        let mut seen_primaries = Vec::new();
        for level in &levels {
            if seen_levels.contains(&level.name.as_str()) {
                return Err(CuratorError::Config(format!(
                    "duplicate taxonomy level '{}'",
                    level.name
                )));
            }
            seen_levels.push(level.name.as_str());

            if level.primaries.is_empty() {
                return Err(CuratorError::Config(format!(
                    "taxonomy level '{}' has no primary patterns",
                    level.name
                )));
            }

            for primary in &level.primaries {
                if seen_primaries.contains(&primary.name.as_str()) {
                    return Err(CuratorError::Config(format!(
                        "primary pattern '{}' appears under more than one level",
                        primary.name
                    )));
                }
                seen_primaries.push(primary.name.as_str());

                if primary.sub_patterns.is_empty() {
                    return Err(CuratorError::Config(format!(
                        "primary pattern '{}' has no sub-patterns",
                        primary.name
                    )));
                }
                for (i, sub) in primary.sub_patterns.iter().enumerate() {
                    if primary.sub_patterns[..i].contains(sub) {
                        return Err(CuratorError::Config(format!(
                            "sub-pattern '{}' repeated under primary '{}'",
                            sub, primary.name
                        )));
                    }
                }
            }
        }

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[TaxonomyLevel] {
        &self.levels
    }

    pub fn level(&self, name: &str) -> Option<&TaxonomyLevel> {
        self.levels.iter().find(|l| l.name == name)
    }

    pub fn primary(&self, level: &str, primary: &str) -> Option<&TaxonomyPrimary> {
        self.level(level)?.primaries.iter().find(|p| p.name == primary)
    }

    pub fn contains_level(&self, name: &str) -> bool {
        self.level(name).is_some()
    }

    pub fn contains_pair(&self, level: &str, primary: &str) -> bool {
        self.primary(level, primary).is_some()
    }

    /// Whether `sub` is a legal sub-pattern for the given (level, primary).
    pub fn sub_is_valid(&self, level: &str, primary: &str, sub: &str) -> bool {
        self.primary(level, primary)
            .map(|p| p.sub_patterns.iter().any(|s| s == sub))
            .unwrap_or(false)
    }

    /// The global fallback pair: the first declared level and its first
    /// declared primary. Construction guarantees both exist.
    pub fn default_pair(&self) -> (&str, &str) {
        let level = &self.levels[0];
        (level.name.as_str(), level.primaries[0].name.as_str())
    }

    /// The first declared primary of a level. Construction guarantees one
    /// exists for every known level.
    pub fn first_primary(&self, level: &str) -> Option<&str> {
        self.level(level).map(|l| l.primaries[0].name.as_str())
    }

    /// The first declared sub-pattern of a (level, primary) pair.
    pub fn first_sub(&self, level: &str, primary: &str) -> Option<&str> {
        self.primary(level, primary).map(|p| p.sub_patterns[0].as_str())
    }
}
