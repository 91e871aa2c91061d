//! Console presentation for stage reports. Long diagnostic lists are
//! truncated here, at the presentation boundary; the reports themselves
//! always carry the complete list.

use crate::curation::enrich::EnrichReport;
use crate::curation::normalize::{AssignmentSource, NormalizeReport};
use crate::curation::validate::ValidationReport;

/// Diagnostics echoed to the console before the omission marker.
pub const MAX_DIAGNOSTICS_SHOWN: usize = 20;

/// Render a validation report as console lines.
pub fn format_validation(report: &ValidationReport) -> Vec<String> {
    if report.passed {
        return vec![format!(
            "✅ Validation passed! All {} problems align with the taxonomy.",
            report.checked
        )];
    }

    let mut lines = vec![format!(
        "❌ Validation failed with {} errors:",
        report.diagnostics.len()
    )];
    for diagnostic in report.diagnostics.iter().take(MAX_DIAGNOSTICS_SHOWN) {
        lines.push(format!("   - {}", diagnostic));
    }
    if report.diagnostics.len() > MAX_DIAGNOSTICS_SHOWN {
        lines.push(format!(
            "   ... and {} more",
            report.diagnostics.len() - MAX_DIAGNOSTICS_SHOWN
        ));
    }
    lines
}

pub fn print_validation(report: &ValidationReport) {
    for line in format_validation(report) {
        println!("{}", line);
    }
}

pub fn print_normalization(report: &NormalizeReport) {
    println!("\n📊 Normalization results:");
    println!("   Total records: {}", report.total);
    println!("   Overridden: {}", report.overridden);
    println!("   Kept existing: {}", report.kept);
    println!("   Legacy fallback: {}", report.legacy);
    println!("   Defaulted: {}", report.defaulted);

    if report.defaulted > 0 {
        println!("\n⚠️  Records classified by the global default:");
        let defaulted: Vec<_> = report
            .assignments
            .iter()
            .filter(|a| a.source == AssignmentSource::Default)
            .collect();
        for assignment in defaulted.iter().take(MAX_DIAGNOSTICS_SHOWN) {
            println!("   - {} (id {})", assignment.slug, assignment.id);
        }
        if defaulted.len() > MAX_DIAGNOSTICS_SHOWN {
            println!("   ... and {} more", defaulted.len() - MAX_DIAGNOSTICS_SHOWN);
        }
    }
}

pub fn print_enrichment(report: &EnrichReport) {
    println!("\n📊 Enrichment results:");
    println!("   Curated merged: {}", report.curated_merged);
    println!("   Curated added: {}", report.curated_added);
    println!("   Drills added: {}", report.drills_added);
    println!("   Catalog size: {}", report.final_size);
}
