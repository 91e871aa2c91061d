use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use pattern_curator::catalog::CatalogStore;
use pattern_curator::config::CuratorConfig;
use pattern_curator::curation::enrich::CatalogEnricher;
use pattern_curator::curation::normalize::TaxonomyNormalizer;
use pattern_curator::curation::validate::TaxonomyValidator;
use pattern_curator::domain::Problem;
use pattern_curator::{logging, report};

#[derive(Parser)]
#[command(name = "pattern_curator")]
#[command(about = "Practice-problem catalog curation tool")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration (defaults to curator.toml, then the
    /// built-in tables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog document path (overrides the configured path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge curated metadata and pad the catalog with drill records
    Enrich {
        /// Report what would change without writing the catalog
        #[arg(long)]
        dry_run: bool,
    },
    /// Re-tag every record with a valid classification triple
    Retag {
        /// Report what would change without writing the catalog
        #[arg(long)]
        dry_run: bool,
    },
    /// Check the catalog against the taxonomy without modifying it
    Validate,
    /// Run the full sequence: enrich, retag, validate, persist
    Run {
        /// Report what would change without writing the catalog
        #[arg(long)]
        dry_run: bool,
    },
}

fn persist(store: &CatalogStore, problems: &[Problem], dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        println!("\n💧 Dry run - catalog left untouched");
        return Ok(());
    }
    let outcome = store.persist(problems)?;
    if outcome.written {
        println!(
            "\n💾 Wrote {} records to {} (sha256 {})",
            problems.len(),
            store.path().display(),
            &outcome.sha256[..12]
        );
    } else {
        println!("\n💾 Catalog unchanged - write skipped");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let config = CuratorConfig::load_or_default(cli.config.as_deref())?;
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.catalog.path));
    let store = CatalogStore::new(catalog_path);

    info!(catalog = %store.path().display(), "loading catalog");
    let problems = store.load()?;
    println!("📥 Loaded {} records from {}", problems.len(), store.path().display());

    match cli.command {
        Commands::Enrich { dry_run } => {
            println!("🔄 Running enrichment...");
            let enricher = CatalogEnricher::new(config.enrichment.clone());
            let enriched = enricher.enrich(problems);
            report::print_enrichment(&enriched.report);
            persist(&store, &enriched.problems, dry_run)?;
        }
        Commands::Retag { dry_run } => {
            println!("🔄 Re-tagging classifications...");
            let normalizer = TaxonomyNormalizer::from_config(&config)?;
            let validator = TaxonomyValidator::new(config.taxonomy()?);

            let normalized = normalizer.normalize(problems);
            report::print_normalization(&normalized.report);

            let validation = validator.validate(&normalized.problems);
            report::print_validation(&validation);
            if !validation.passed {
                // Normalization guarantees validity unless an override table
                // entry points outside the hierarchy.
                error!(violations = validation.diagnostics.len(), "re-tagged catalog failed validation");
                std::process::exit(1);
            }
            persist(&store, &normalized.problems, dry_run)?;
        }
        Commands::Validate => {
            println!("🔎 Validating catalog...");
            let validator = TaxonomyValidator::new(config.taxonomy()?);
            let validation = validator.validate(&problems);
            report::print_validation(&validation);
            if !validation.passed {
                std::process::exit(1);
            }
        }
        Commands::Run { dry_run } => {
            println!("🚀 Running full curation pipeline...");
            let enricher = CatalogEnricher::new(config.enrichment.clone());
            let normalizer = TaxonomyNormalizer::from_config(&config)?;
            let validator = TaxonomyValidator::new(config.taxonomy()?);

            println!("\n📎 Step 1: Enrichment");
            let enriched = enricher.enrich(problems);
            report::print_enrichment(&enriched.report);

            println!("\n🏷️  Step 2: Classification");
            let normalized = normalizer.normalize(enriched.problems);
            report::print_normalization(&normalized.report);

            println!("\n🔎 Step 3: Validation");
            let validation = validator.validate(&normalized.problems);
            report::print_validation(&validation);
            if !validation.passed {
                error!(violations = validation.diagnostics.len(), "curated catalog failed validation, nothing persisted");
                std::process::exit(1);
            }

            persist(&store, &normalized.problems, dry_run)?;
            println!("✅ Full curation pipeline completed successfully!");
        }
    }

    Ok(())
}
