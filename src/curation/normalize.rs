use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::{CuratorConfig, LegacyTarget};
use crate::domain::{Classification, Problem};
use crate::error::Result;
use crate::taxonomy::Taxonomy;

/// How a record's classification triple was decided.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSource {
    /// An explicit per-slug override supplied the triple.
    Override,
    /// The record's existing (level, primary) pair was already valid.
    Existing,
    /// The pair was derived from the legacy algorithmType mapping.
    LegacyFallback,
    /// No usable signal; the first declared level and primary were assigned.
    Default,
}

/// One per-record entry in the normalization report.
///
/// The `Default` source is the only visibility callers get into records
/// whose legacy type had no mapping; nothing is raised for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub slug: String,
    pub classification: Classification,
    pub source: AssignmentSource,
}

/// Summary of one normalization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub total: usize,
    pub overridden: usize,
    pub kept: usize,
    pub legacy: usize,
    pub defaulted: usize,
    /// One entry per record, in input order.
    pub assignments: Vec<Assignment>,
    /// When this normalization was performed.
    pub normalized_at: DateTime<Utc>,
}

/// The normalized records together with their report. Mutation is confined
/// to this returned value; the caller decides whether and when to persist.
#[derive(Debug, Clone)]
pub struct NormalizedCatalog {
    pub problems: Vec<Problem>,
    pub report: NormalizeReport,
}

/// Assigns every record a classification triple that satisfies the taxonomy.
///
/// Resolution order per record: explicit slug override, the record's own
/// already-valid pair, the legacy algorithmType mapping, then the first
/// declared level and primary. Holds only immutable configuration; calls
/// share no state.
pub struct TaxonomyNormalizer {
    taxonomy: Taxonomy,
    overrides: HashMap<String, Classification>,
    legacy_fallback: HashMap<String, LegacyTarget>,
    default_subs: HashMap<String, String>,
}

impl TaxonomyNormalizer {
    pub fn new(
        taxonomy: Taxonomy,
        overrides: HashMap<String, Classification>,
        legacy_fallback: HashMap<String, LegacyTarget>,
        default_subs: HashMap<String, String>,
    ) -> Self {
        Self {
            taxonomy,
            overrides,
            legacy_fallback,
            default_subs,
        }
    }

    /// Build a normalizer from loaded configuration, validating the taxonomy.
    pub fn from_config(config: &CuratorConfig) -> Result<Self> {
        Ok(Self::new(
            config.taxonomy()?,
            config.overrides.clone(),
            config.legacy_fallback.clone(),
            config.default_subs.clone(),
        ))
    }

    /// Assign every record a valid triple. Never fails for a well-formed
    /// taxonomy; every path has a deterministic fallback.
    pub fn normalize(&self, problems: Vec<Problem>) -> NormalizedCatalog {
        let mut problems = problems;
        let mut assignments = Vec::with_capacity(problems.len());
        let (mut overridden, mut kept, mut legacy, mut defaulted) = (0usize, 0usize, 0usize, 0usize);

        for problem in &mut problems {
            let (classification, source) = match self.overrides.get(&problem.slug) {
                // Overrides are hand corrections and are applied verbatim;
                // validate() is the safety net for a bad table entry.
                Some(triple) => (triple.clone(), AssignmentSource::Override),
                None => {
                    let (level, primary, source) = self.resolve_pair(problem);
                    let sub = self.resolve_sub(problem, &level, &primary);
                    (Classification { level, primary, sub }, source)
                }
            };

            problem.set_classification(&classification);
            match source {
                AssignmentSource::Override => overridden += 1,
                AssignmentSource::Existing => kept += 1,
                AssignmentSource::LegacyFallback => legacy += 1,
                AssignmentSource::Default => defaulted += 1,
            }
            assignments.push(Assignment {
                id: problem.id,
                slug: problem.slug.clone(),
                classification,
                source,
            });
        }

        let report = NormalizeReport {
            total: problems.len(),
            overridden,
            kept,
            legacy,
            defaulted,
            assignments,
            normalized_at: Utc::now(),
        };

        NormalizedCatalog { problems, report }
    }

    /// Resolve the (level, primary) pair for a record without an override.
    fn resolve_pair(&self, problem: &Problem) -> (String, String, AssignmentSource) {
        if let (Some(level), Some(primary)) = (&problem.pattern_level, &problem.primary_pattern) {
            if self.taxonomy.contains_pair(level, primary) {
                return (level.clone(), primary.clone(), AssignmentSource::Existing);
            }
        }

        let (default_level, default_primary) = self.taxonomy.default_pair();

        if let Some(target) = problem
            .algorithm_type
            .as_ref()
            .and_then(|t| self.legacy_fallback.get(t))
        {
            // A fallback entry may point outside the hierarchy; repair level
            // first, then primary within the repaired level.
            let level = if self.taxonomy.contains_level(&target.level) {
                target.level.as_str()
            } else {
                default_level
            };
            let primary = if self.taxonomy.contains_pair(level, &target.primary) {
                target.primary.as_str()
            } else {
                self.taxonomy.first_primary(level).unwrap_or(default_primary)
            };
            return (level.to_string(), primary.to_string(), AssignmentSource::LegacyFallback);
        }

        (
            default_level.to_string(),
            default_primary.to_string(),
            AssignmentSource::Default,
        )
    }

    /// Resolve the sub-pattern for an already-valid (level, primary) pair.
    fn resolve_sub(&self, problem: &Problem, level: &str, primary: &str) -> String {
        if let Some(sub) = &problem.sub_pattern {
            if self.taxonomy.sub_is_valid(level, primary, sub) {
                return sub.clone();
            }
        }
        if let Some(sub) = self.default_subs.get(primary) {
            if self.taxonomy.sub_is_valid(level, primary, sub) {
                return sub.clone();
            }
        }
        self.taxonomy
            .first_sub(level, primary)
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn normalizer() -> TaxonomyNormalizer {
        TaxonomyNormalizer::from_config(&defaults::default_config()).unwrap()
    }

    fn legacy_problem(slug: &str, algorithm_type: &str) -> Problem {
        let mut problem = Problem::new(7, "Legacy Problem", slug);
        problem.algorithm_type = Some(algorithm_type.to_string());
        problem
    }

    #[test]
    fn test_override_takes_precedence() {
        let normalizer = normalizer();
        let mut problem = legacy_problem("two-sum", "two_pointer");
        // Prior classification must lose against the override.
        problem.pattern_level = Some("foundation".to_string());
        problem.primary_pattern = Some("array_basics".to_string());
        problem.sub_pattern = Some("prefix_sum".to_string());

        let result = normalizer.normalize(vec![problem]);
        let triple = result.problems[0].classification().unwrap();
        assert_eq!(triple, Classification::new("core_patterns", "two_pointer", "opposite_direction"));
        assert_eq!(result.report.overridden, 1);
        assert_eq!(result.report.assignments[0].source, AssignmentSource::Override);
    }

    #[test]
    fn test_legacy_fallback_assigns_pair_and_default_sub() {
        let normalizer = normalizer();
        let result = normalizer.normalize(vec![legacy_problem("cycle-check", "two_pointer")]);

        let triple = result.problems[0].classification().unwrap();
        assert_eq!(triple, Classification::new("core_patterns", "two_pointer", "same_direction"));
        assert_eq!(result.report.legacy, 1);
    }

    #[test]
    fn test_valid_existing_pair_is_kept() {
        let normalizer = normalizer();
        let mut problem = legacy_problem("window-drill", "two_pointer");
        problem.pattern_level = Some("core_patterns".to_string());
        problem.primary_pattern = Some("sliding_window".to_string());
        problem.sub_pattern = Some("at_most_k".to_string());

        let result = normalizer.normalize(vec![problem]);
        let triple = result.problems[0].classification().unwrap();
        // The legacy type points at two_pointer, but the existing valid pair wins.
        assert_eq!(triple, Classification::new("core_patterns", "sliding_window", "at_most_k"));
        assert_eq!(result.report.kept, 1);
    }

    #[test]
    fn test_invalid_pair_is_reassigned() {
        let normalizer = normalizer();
        let mut problem = legacy_problem("bad-pair", "graph");
        // two_pointer is not a primary of advanced_patterns.
        problem.pattern_level = Some("advanced_patterns".to_string());
        problem.primary_pattern = Some("two_pointer".to_string());

        let result = normalizer.normalize(vec![problem]);
        let triple = result.problems[0].classification().unwrap();
        assert_eq!(triple.level, "advanced_patterns");
        assert_eq!(triple.primary, "graph_traversal");
        assert_eq!(result.report.legacy, 1);
    }

    #[test]
    fn test_unknown_legacy_type_defaults_to_first_declared_pair() {
        let normalizer = normalizer();
        let result = normalizer.normalize(vec![
            legacy_problem("mystery-a", "dynamic_programming"),
            legacy_problem("mystery-b", "dynamic_programming"),
        ]);

        let a = result.problems[0].classification().unwrap();
        let b = result.problems[1].classification().unwrap();
        assert_eq!(a, Classification::new("foundation", "array_basics", "prefix_sum"));
        // Same legacy type, same resolution.
        assert_eq!(a, b);
        assert_eq!(result.report.defaulted, 2);
    }

    #[test]
    fn test_invalid_sub_is_replaced_within_resolved_pair() {
        let normalizer = normalizer();
        let mut problem = legacy_problem("stale-sub", "binary_search");
        problem.pattern_level = Some("core_patterns".to_string());
        problem.primary_pattern = Some("binary_search".to_string());
        problem.sub_pattern = Some("same_direction".to_string());

        let result = normalizer.normalize(vec![problem]);
        let triple = result.problems[0].classification().unwrap();
        assert_eq!(triple.sub, "classic");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = normalizer();
        let problems = vec![
            legacy_problem("cycle-check", "two_pointer"),
            legacy_problem("mystery", "unmapped_type"),
            legacy_problem("two-sum", "two_pointer"),
        ];

        let once = normalizer.normalize(problems);
        let twice = normalizer.normalize(once.problems.clone());

        for (a, b) in once.problems.iter().zip(twice.problems.iter()) {
            assert_eq!(a.classification(), b.classification());
        }
    }

    #[test]
    fn test_resolved_sub_is_always_inside_the_hierarchy() {
        let normalizer = normalizer();
        let taxonomy = defaults::default_config().taxonomy().unwrap();
        let inputs = vec![
            legacy_problem("a", "tree"),
            legacy_problem("b", "stack"),
            legacy_problem("c", "nonsense"),
            {
                let mut p = legacy_problem("d", "graph");
                p.sub_pattern = Some("not_a_sub".to_string());
                p
            },
        ];

        let result = normalizer.normalize(inputs);
        for problem in &result.problems {
            let triple = problem.classification().unwrap();
            assert!(taxonomy.sub_is_valid(&triple.level, &triple.primary, &triple.sub));
        }
    }
}
