use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::defaults;
use crate::domain::Classification;
use crate::error::{CuratorError, Result};
use crate::taxonomy::{Taxonomy, TaxonomyLevel};

/// Path probed when no --config flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "curator.toml";

/// The immutable configuration for one curation run: catalog location,
/// taxonomy tables, slug overrides, legacy fallback, default sub-patterns,
/// and enrichment tables. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct CuratorConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub taxonomy: TaxonomyTables,
    /// Slug -> explicit classification triple, applied ahead of any inference.
    #[serde(default)]
    pub overrides: HashMap<String, Classification>,
    /// Legacy algorithmType -> provisional (level, primary) pair.
    #[serde(default)]
    pub legacy_fallback: HashMap<String, LegacyTarget>,
    /// Primary pattern -> preferred sub-pattern when a record needs one.
    #[serde(default)]
    pub default_subs: HashMap<String, String>,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "data/problems.json".to_string()
}

/// The raw taxonomy tables as declared in configuration. Validated into a
/// `Taxonomy` at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyTables {
    pub levels: Vec<TaxonomyLevel>,
}

/// Target of a legacy algorithmType mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTarget {
    pub level: String,
    pub primary: String,
}

/// Configuration for the enrichment stage.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// The catalog is padded with synthetic drill records up to this size.
    #[serde(default = "default_target_size")]
    pub target_size: usize,
    /// First id considered when allocating ids for synthetic records.
    #[serde(default = "default_synthetic_id_start")]
    pub synthetic_id_start: u64,
    /// Display patterns the synthetic drills rotate through.
    #[serde(default)]
    pub drill_patterns: Vec<String>,
    /// Hand-curated per-problem metadata, merged into matching records and
    /// appended as new records otherwise.
    #[serde(default)]
    pub curated: Vec<CuratedEntry>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            synthetic_id_start: default_synthetic_id_start(),
            drill_patterns: Vec::new(),
            curated: Vec::new(),
        }
    }
}

fn default_target_size() -> usize {
    100
}

fn default_synthetic_id_start() -> u64 {
    1000
}

/// One hand-curated catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CuratedEntry {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub difficulty: String,
    pub algorithm_type: String,
    /// Display pattern name, e.g. "Two Pointer".
    pub pattern: String,
    pub reason: String,
    pub time: String,
    pub space: String,
}

impl CuratorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CuratorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: CuratorConfig = toml::from_str(&content)?;
        // Surface a malformed taxonomy at startup rather than mid-run.
        config.taxonomy()?;
        Ok(config)
    }

    /// Load the file at `path` when given; otherwise probe
    /// `curator.toml` and fall back to the built-in tables.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let probe = Path::new(DEFAULT_CONFIG_PATH);
                if probe.exists() {
                    Self::load(probe)
                } else {
                    Ok(defaults::default_config())
                }
            }
        }
    }

    /// Validate the declared tables into a `Taxonomy`.
    pub fn taxonomy(&self) -> Result<Taxonomy> {
        Taxonomy::new(self.taxonomy.levels.clone())
    }
}
