use crate::output::{print_json, RULE};
use hooks_core::audit::{self, AuditReport};
use hooks_core::types::{Dimension, Severity};
use std::path::Path;

pub fn run(root: &Path, gate: bool, threshold: u32, json: bool) -> anyhow::Result<i32> {
    let report = audit::run(root);
    let blocked = gate && report.should_block(threshold);

    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
        if blocked {
            println!();
            println!(
                "Blocked: {} errors with score {} under threshold {threshold}. Fix the errors above before proceeding.",
                report.error_count(),
                report.score()
            );
        }
    }

    Ok(if blocked { 1 } else { 0 })
}

fn print_report(report: &AuditReport) {
    println!("{RULE}");
    println!(
        "ONTOLOGY COMPLIANCE & CLEANLINESS - {} ({}/100)",
        report.status_label(),
        report.score()
    );
    println!("{RULE}");

    let errors: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .collect();
    let warnings: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .collect();

    if !errors.is_empty() {
        println!();
        println!("ERRORS:");
        for issue in &errors {
            println!("  - {}", issue.message);
        }
    }

    if !warnings.is_empty() || !report.advisories.is_empty() {
        println!();
        println!("WARNINGS:");
        for issue in &warnings {
            println!("  - {}", issue.message);
        }
        for advisory in report.advisories.iter().take(5) {
            println!("  - {advisory}");
        }
        if report.advisories.len() > 5 {
            println!("  ... and {} more warnings", report.advisories.len() - 5);
        }
    }

    println!();
    println!("METRICS:");
    println!("  Root violations:        {}", report.metrics.root_violations);
    println!("  Misnamed files:         {}", report.metrics.misnamed_files);
    println!("  Orphaned files:         {}", report.metrics.orphaned_files);
    println!(
        "  Files without metadata: {}",
        report.metrics.files_without_metadata
    );

    if errors.is_empty() && warnings.is_empty() && report.advisories.is_empty() {
        println!();
        println!("Everything is clean. Ready to proceed.");
    }

    if report.score() < 90 {
        println!();
        println!("RECOMMENDATIONS:");
        if report.metrics.root_violations > 0 {
            println!("  - Move unauthorized files from the root to one/<dimension>/");
            println!("    The root should only contain: README.md, LICENSE.md, SECURITY.md, CLAUDE.md, AGENTS.md");
        }
        if report.metrics.files_without_metadata > 0 {
            println!("  - Run `one-hooks tag` to add metadata front matter");
        }
        if report.metrics.misnamed_files > 0 {
            println!("  - Run `one-hooks check` for kebab-case rename suggestions");
        }
        if report.error_count() > 0 {
            println!("  - Fix critical ontology violations before proceeding");
        }
        println!();
        println!("6-dimension ontology:");
        for dim in Dimension::all() {
            println!("  {:<12} {}", format!("{dim}:"), dim.describe());
        }
    }

    println!("{RULE}");
}
