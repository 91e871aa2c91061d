//! Built-in configuration tables, used when no config file is supplied.
//!
//! These are the canonical copies of the hierarchy, override, fallback, and
//! default-sub tables; a config file replaces them wholesale rather than
//! merging, so there is exactly one source of truth per run.

use std::collections::HashMap;

use crate::config::{
    CatalogConfig, CuratedEntry, CuratorConfig, EnrichmentConfig, LegacyTarget, TaxonomyTables,
};
use crate::domain::Classification;
use crate::taxonomy::{TaxonomyLevel, TaxonomyPrimary};

fn primary(name: &str, subs: &[&str]) -> TaxonomyPrimary {
    TaxonomyPrimary {
        name: name.to_string(),
        sub_patterns: subs.iter().map(|s| s.to_string()).collect(),
    }
}

fn level(name: &str, primaries: Vec<TaxonomyPrimary>) -> TaxonomyLevel {
    TaxonomyLevel {
        name: name.to_string(),
        primaries,
    }
}

/// The default three-level hierarchy.
pub fn default_levels() -> Vec<TaxonomyLevel> {
    vec![
        level(
            "foundation",
            vec![
                primary(
                    "array_basics",
                    &["prefix_sum", "difference_array", "cyclic_sort", "in_place_rearrangement"],
                ),
                primary(
                    "string_basics",
                    &["character_frequency", "anagram_checking", "two_pointer_string"],
                ),
            ],
        ),
        level(
            "core_patterns",
            vec![
                primary(
                    "two_pointer",
                    &[
                        "same_direction",
                        "opposite_direction",
                        "slow_fast_pointer",
                        "partition_pattern",
                        "cycle_detection",
                    ],
                ),
                primary(
                    "sliding_window",
                    &[
                        "fixed_window",
                        "variable_window",
                        "at_most_k",
                        "exact_k",
                        "longest_type",
                        "minimum_type",
                    ],
                ),
                primary(
                    "binary_search",
                    &[
                        "classic",
                        "lower_bound",
                        "upper_bound",
                        "search_on_answer",
                        "predicate_binary_search",
                        "rotated_array_search",
                    ],
                ),
            ],
        ),
        level(
            "advanced_patterns",
            vec![
                primary(
                    "graph_traversal",
                    &[
                        "bfs_level_order",
                        "dfs_backtracking",
                        "topological_sort",
                        "shortest_path_unweighted",
                    ],
                ),
                primary(
                    "tree_patterns",
                    &["postorder_accumulation", "path_sum", "diameter_calculation", "lca"],
                ),
            ],
        ),
    ]
}

/// Hand-corrected classifications for well-known problems.
pub fn default_overrides() -> HashMap<String, Classification> {
    let entries = [
        ("two-sum", "core_patterns", "two_pointer", "opposite_direction"),
        ("add-two-numbers", "core_patterns", "two_pointer", "same_direction"),
        (
            "longest-substring-without-repeating-characters",
            "core_patterns",
            "sliding_window",
            "variable_window",
        ),
        ("median-of-two-sorted-arrays", "core_patterns", "binary_search", "classic"),
        ("longest-palindromic-substring", "core_patterns", "two_pointer", "opposite_direction"),
        ("container-with-most-water", "core_patterns", "two_pointer", "opposite_direction"),
        ("3sum", "core_patterns", "two_pointer", "opposite_direction"),
        ("climbing-stairs", "advanced_patterns", "tree_patterns", "postorder_accumulation"),
        ("merge-k-sorted-lists", "core_patterns", "two_pointer", "same_direction"),
        ("reverse-nodes-in-k-group", "core_patterns", "two_pointer", "same_direction"),
        (
            "search-in-rotated-sorted-array",
            "core_patterns",
            "binary_search",
            "rotated_array_search",
        ),
        ("trapping-rain-water", "core_patterns", "two_pointer", "opposite_direction"),
        ("permutations", "advanced_patterns", "graph_traversal", "dfs_backtracking"),
        ("subsets", "advanced_patterns", "graph_traversal", "dfs_backtracking"),
        ("word-search", "advanced_patterns", "graph_traversal", "dfs_backtracking"),
        (
            "binary-tree-level-order-traversal",
            "advanced_patterns",
            "graph_traversal",
            "bfs_level_order",
        ),
    ];

    entries
        .iter()
        .map(|(slug, level, primary, sub)| {
            (slug.to_string(), Classification::new(*level, *primary, *sub))
        })
        .collect()
}

/// Legacy algorithmType -> provisional (level, primary) pairs.
pub fn default_legacy_fallback() -> HashMap<String, LegacyTarget> {
    let entries = [
        ("two_pointer", "core_patterns", "two_pointer"),
        ("sliding_window", "core_patterns", "sliding_window"),
        ("binary_search", "core_patterns", "binary_search"),
        ("tree", "advanced_patterns", "tree_patterns"),
        ("graph", "advanced_patterns", "graph_traversal"),
        ("stack", "foundation", "array_basics"),
        ("linked_list", "core_patterns", "two_pointer"),
        ("recursion", "advanced_patterns", "tree_patterns"),
    ];

    entries
        .iter()
        .map(|(legacy, level, primary)| {
            (
                legacy.to_string(),
                LegacyTarget {
                    level: level.to_string(),
                    primary: primary.to_string(),
                },
            )
        })
        .collect()
}

/// Preferred sub-pattern per primary, used before the positional default.
pub fn default_subs() -> HashMap<String, String> {
    let entries = [
        ("two_pointer", "same_direction"),
        ("sliding_window", "variable_window"),
        ("binary_search", "classic"),
        ("tree_patterns", "postorder_accumulation"),
        ("graph_traversal", "bfs_level_order"),
        ("array_basics", "prefix_sum"),
        ("string_basics", "character_frequency"),
    ];

    entries
        .iter()
        .map(|(primary, sub)| (primary.to_string(), sub.to_string()))
        .collect()
}

/// Display patterns the synthetic drill records rotate through.
pub fn default_drill_patterns() -> Vec<String> {
    [
        "Array",
        "Two Pointer",
        "Sliding Window",
        "Binary Search",
        "Recursion",
        "Backtracking",
        "Stack",
        "Queue",
        "Linked List",
        "Graph (BFS/DFS)",
        "Heap / Priority Queue",
        "Greedy",
        "Prefix Sum",
        "Dynamic Programming",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn curated(
    id: u64,
    title: &str,
    slug: &str,
    difficulty: &str,
    algorithm_type: &str,
    pattern: &str,
    reason: &str,
    time: &str,
    space: &str,
) -> CuratedEntry {
    CuratedEntry {
        id,
        title: title.to_string(),
        slug: slug.to_string(),
        difficulty: difficulty.to_string(),
        algorithm_type: algorithm_type.to_string(),
        pattern: pattern.to_string(),
        reason: reason.to_string(),
        time: time.to_string(),
        space: space.to_string(),
    }
}

/// A starter set of hand-curated metadata entries. Deployments with a full
/// curated catalog carry the rest in their config file.
pub fn default_curated() -> Vec<CuratedEntry> {
    vec![
        curated(
            1,
            "Two Sum",
            "two-sum",
            "Easy",
            "two_pointer",
            "Array",
            "Requires finding a pair with a specific sum.",
            "O(n)",
            "O(n)",
        ),
        curated(
            3,
            "Longest Substring Without Repeating Characters",
            "longest-substring-without-repeating-characters",
            "Medium",
            "sliding_window",
            "Sliding Window",
            "Contiguous segment check for uniqueness.",
            "O(n)",
            "O(min(m, n))",
        ),
        curated(
            11,
            "Container With Most Water",
            "container-with-most-water",
            "Medium",
            "two_pointer",
            "Two Pointer",
            "Shrinking search space by moving pointers inward.",
            "O(n)",
            "O(1)",
        ),
        curated(
            20,
            "Valid Parentheses",
            "valid-parentheses",
            "Easy",
            "stack",
            "Stack",
            "LIFO behavior for matching brackets.",
            "O(n)",
            "O(n)",
        ),
        curated(
            33,
            "Search in Rotated Sorted Array",
            "search-in-rotated-sorted-array",
            "Medium",
            "binary_search",
            "Binary Search",
            "Logarithmic search in modified sorted space.",
            "O(log n)",
            "O(1)",
        ),
        curated(
            46,
            "Permutations",
            "permutations",
            "Medium",
            "recursion",
            "Backtracking",
            "Generating all possible orderings recursively.",
            "O(n * n!)",
            "O(n)",
        ),
        curated(
            102,
            "Binary Tree Level Order Traversal",
            "binary-tree-level-order-traversal",
            "Medium",
            "tree",
            "Graph (BFS/DFS)",
            "Queue-based breadth-first visit.",
            "O(n)",
            "O(n)",
        ),
        curated(
            141,
            "Linked List Cycle",
            "linked-list-cycle",
            "Easy",
            "linked_list",
            "Two Pointer",
            "Floyd's Tortoise and Hare detection.",
            "O(n)",
            "O(1)",
        ),
        curated(
            704,
            "Binary Search",
            "binary-search",
            "Easy",
            "binary_search",
            "Binary Search",
            "Standard logarithmic target lookup.",
            "O(log n)",
            "O(1)",
        ),
    ]
}

/// The full built-in configuration.
pub fn default_config() -> CuratorConfig {
    CuratorConfig {
        catalog: CatalogConfig::default(),
        taxonomy: TaxonomyTables {
            levels: default_levels(),
        },
        overrides: default_overrides(),
        legacy_fallback: default_legacy_fallback(),
        default_subs: default_subs(),
        enrichment: EnrichmentConfig {
            target_size: 100,
            synthetic_id_start: 1000,
            drill_patterns: default_drill_patterns(),
            curated: default_curated(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_is_well_formed() {
        let config = default_config();
        assert!(config.taxonomy().is_ok());
    }

    #[test]
    fn test_default_tables_are_consistent() {
        let config = default_config();
        let taxonomy = config.taxonomy().unwrap();

        for (slug, triple) in &config.overrides {
            assert!(
                taxonomy.sub_is_valid(&triple.level, &triple.primary, &triple.sub),
                "override for '{}' points outside the hierarchy",
                slug
            );
        }
        for (legacy, target) in &config.legacy_fallback {
            assert!(
                taxonomy.contains_pair(&target.level, &target.primary),
                "legacy fallback for '{}' points outside the hierarchy",
                legacy
            );
        }
        for (primary, sub) in &config.default_subs {
            let owner = taxonomy
                .levels()
                .iter()
                .find(|l| l.primaries.iter().any(|p| p.name == *primary))
                .expect("default_subs primary must exist");
            assert!(taxonomy.sub_is_valid(&owner.name, primary, sub));
        }
    }

    #[test]
    fn test_default_pair_is_first_declared() {
        let taxonomy = default_config().taxonomy().unwrap();
        assert_eq!(taxonomy.default_pair(), ("foundation", "array_basics"));
    }
}
