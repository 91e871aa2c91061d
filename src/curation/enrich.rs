use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

use crate::config::{CuratedEntry, EnrichmentConfig};
use crate::domain::Problem;

/// Summary of one enrichment pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichReport {
    /// Curated entries merged into records that already existed.
    pub curated_merged: usize,
    /// Curated entries appended as new records.
    pub curated_added: usize,
    /// Synthetic drill records appended to reach the target size.
    pub drills_added: usize,
    pub final_size: usize,
    /// When this enrichment was performed.
    pub enriched_at: DateTime<Utc>,
}

/// The enriched records together with their report.
#[derive(Debug, Clone)]
pub struct EnrichedCatalog {
    pub problems: Vec<Problem>,
    pub report: EnrichReport,
}

/// Merges curated metadata into the catalog and pads it with synthetic
/// drill records up to the configured target size.
///
/// This stage never writes the classification triple; re-tagging is the
/// normalizer's job and runs after enrichment.
pub struct CatalogEnricher {
    config: EnrichmentConfig,
}

impl CatalogEnricher {
    pub fn new(config: EnrichmentConfig) -> Self {
        Self { config }
    }

    pub fn enrich(&self, problems: Vec<Problem>) -> EnrichedCatalog {
        let mut problems = problems;
        let mut used_ids: HashSet<u64> = problems.iter().map(|p| p.id).collect();
        let (mut curated_merged, mut curated_added) = (0usize, 0usize);

        for entry in &self.config.curated {
            if let Some(existing) = problems.iter_mut().find(|p| p.id == entry.id) {
                apply_curated(existing, entry);
                curated_merged += 1;
            } else {
                problems.push(build_curated(entry));
                used_ids.insert(entry.id);
                curated_added += 1;
            }
        }

        let mut drills_added = 0usize;
        if !self.config.drill_patterns.is_empty() {
            let mut next_id = self.config.synthetic_id_start;
            while problems.len() < self.config.target_size {
                while used_ids.contains(&next_id) {
                    next_id += 1;
                }
                let index = problems.len();
                let pattern = &self.config.drill_patterns[index % self.config.drill_patterns.len()];
                problems.push(build_drill(next_id, index, pattern));
                used_ids.insert(next_id);
                drills_added += 1;
            }
        }

        let report = EnrichReport {
            curated_merged,
            curated_added,
            drills_added,
            final_size: problems.len(),
            enriched_at: Utc::now(),
        };

        EnrichedCatalog { problems, report }
    }
}

/// Fill annotation fields on an existing record from its curated entry.
fn apply_curated(problem: &mut Problem, entry: &CuratedEntry) {
    problem.short_pattern_reason = Some(entry.reason.clone());
    problem.time_complexity = Some(entry.time.clone());
    problem.space_complexity = Some(entry.space.clone());
    problem.pattern_signals = Some(vec![
        entry.reason.clone(),
        format!("Uses {} logic.", entry.pattern),
    ]);
    problem.edge_cases = Some(vec![
        "Empty input".to_string(),
        "Single element".to_string(),
        "Maximum constraints".to_string(),
    ]);
    if problem.status.as_deref() == Some("complete") {
        problem.status = Some("strong".to_string());
    }
}

/// Build a full record for a curated entry missing from the catalog.
fn build_curated(entry: &CuratedEntry) -> Problem {
    let mut problem = Problem::new(entry.id, entry.title.clone(), entry.slug.clone());
    problem.difficulty = Some(entry.difficulty.clone());
    problem.status = Some("new".to_string());
    problem.algorithm_type = Some(entry.algorithm_type.clone());
    problem.tags = Some(vec![entry.pattern.clone()]);
    problem.short_pattern_reason = Some(entry.reason.clone());
    problem.time_complexity = Some(entry.time.clone());
    problem.space_complexity = Some(entry.space.clone());
    problem.pattern_signals = Some(vec![entry.reason.clone()]);
    problem.edge_cases = Some(vec!["Small input".to_string(), "Large values".to_string()]);
    problem.problem_statement = Some(format!("Standard LeetCode problem: {}.", entry.title));
    problem
        .extra
        .insert("constraints".to_string(), json!(["N <= 10^5"]));
    problem.extra.insert(
        "complexity".to_string(),
        json!({"brute": "O(n²)", "optimal": entry.time, "space": entry.space}),
    );
    problem
}

/// Build one synthetic drill record. `index` is the record's position in the
/// catalog at append time and drives the title, difficulty, and pattern
/// rotation.
fn build_drill(id: u64, index: usize, pattern: &str) -> Problem {
    let number = index + 1;
    let mut problem = Problem::new(
        id,
        format!("Pattern Drill {}", number),
        format!("pattern-drill-{}", number),
    );
    let difficulty = if index % 3 == 0 { "Medium" } else { "Easy" };
    problem.difficulty = Some(difficulty.to_string());
    problem.status = Some("new".to_string());
    problem.algorithm_type = Some("two_pointer".to_string());
    problem.tags = Some(vec![pattern.to_string()]);
    problem.short_pattern_reason = Some(format!("Fundamental drill for {} recognition.", pattern));
    problem.time_complexity = Some("O(n)".to_string());
    problem.space_complexity = Some("O(1)".to_string());
    problem.problem_statement = Some(format!("Practice your {} skills with this scenario.", pattern));
    problem.extra.insert(
        "complexity".to_string(),
        json!({"brute": "O(n²)", "optimal": "O(n)", "space": "O(1)"}),
    );
    problem
}
