use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Problem;
use crate::taxonomy::Taxonomy;

/// Why a record failed the hierarchy check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    UnknownLevel,
    UnknownPrimaryForLevel,
    UnknownSubForPrimary,
}

impl ViolationReason {
    /// The document field the violation is anchored to.
    pub fn field(&self) -> &'static str {
        match self {
            ViolationReason::UnknownLevel => "patternLevel",
            ViolationReason::UnknownPrimaryForLevel => "primaryPattern",
            ViolationReason::UnknownSubForPrimary => "subPattern",
        }
    }
}

/// One validation failure. At most one is reported per record: checking
/// stops at the first violated field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: u64,
    pub title: String,
    pub reason: ViolationReason,
    /// The offending value, when the field was present at all.
    pub found: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(value) => write!(
                f,
                "Problem {} ({}): Invalid {} '{}'",
                self.id,
                self.title,
                self.reason.field(),
                value
            ),
            None => write!(
                f,
                "Problem {} ({}): Missing {}",
                self.id,
                self.title,
                self.reason.field()
            ),
        }
    }
}

/// Outcome of a validation pass. The diagnostics list is always complete;
/// any truncation is the presentation layer's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub checked: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// When this check was performed.
    pub checked_at: DateTime<Utc>,
}

/// Pure hierarchy check over a record collection. Reports, never raises,
/// and never mutates its input.
pub struct TaxonomyValidator {
    taxonomy: Taxonomy,
}

impl TaxonomyValidator {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn validate(&self, problems: &[Problem]) -> ValidationReport {
        let diagnostics: Vec<Diagnostic> =
            problems.iter().filter_map(|p| self.check(p)).collect();

        ValidationReport {
            passed: diagnostics.is_empty(),
            checked: problems.len(),
            diagnostics,
            checked_at: Utc::now(),
        }
    }

    fn check(&self, problem: &Problem) -> Option<Diagnostic> {
        let diagnostic = |reason: ViolationReason, found: &Option<String>| Diagnostic {
            id: problem.id,
            title: problem.title.clone(),
            reason,
            found: found.clone(),
        };

        let level = match &problem.pattern_level {
            Some(level) if self.taxonomy.contains_level(level) => level,
            _ => return Some(diagnostic(ViolationReason::UnknownLevel, &problem.pattern_level)),
        };

        let primary = match &problem.primary_pattern {
            Some(primary) if self.taxonomy.contains_pair(level, primary) => primary,
            _ => {
                return Some(diagnostic(
                    ViolationReason::UnknownPrimaryForLevel,
                    &problem.primary_pattern,
                ))
            }
        };

        match &problem.sub_pattern {
            Some(sub) if self.taxonomy.sub_is_valid(level, primary, sub) => None,
            _ => Some(diagnostic(
                ViolationReason::UnknownSubForPrimary,
                &problem.sub_pattern,
            )),
        }
    }
}
