use crate::output::print_json;
use hooks_core::naming::{self, NamingFinding};
use hooks_core::types::Dimension;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<i32> {
    let findings = naming::scan(root);

    if json {
        print_json(&findings)?;
        return Ok(if findings.is_empty() { 0 } else { 1 });
    }

    println!("Checking 6-dimension ontology structure and file naming...");
    println!();

    if findings.is_empty() {
        println!("All files follow the kebab-case naming convention.");
        println!("Ontology structure is valid.");
        println!();
        println!("6-dimension ontology:");
        for dim in Dimension::all() {
            println!("  {:<12} {}", format!("{dim}:"), dim.describe());
        }
        return Ok(0);
    }

    let (dimensions, filenames): (Vec<_>, Vec<_>) = findings
        .iter()
        .partition(|f| matches!(f, NamingFinding::InvalidDimension { .. }));

    if !dimensions.is_empty() {
        println!("Found {} ontology structure errors:", dimensions.len());
        println!();
        for finding in &dimensions {
            if let NamingFinding::InvalidDimension { path, dimension } = finding {
                println!("  {path}");
                println!(
                    "  Invalid dimension '{dimension}'. Must be one of: groups, people, things, connections, events, knowledge"
                );
                println!();
            }
        }
    }

    if !filenames.is_empty() {
        println!("Found {} files with invalid naming:", filenames.len());
        println!();
        for finding in &filenames {
            if let NamingFinding::InvalidFilename {
                path,
                filename,
                suggested,
                location,
            } = finding
            {
                println!("  {path}");
                println!("  Current:   {filename}");
                println!("  Suggested: {suggested}");
                println!("  Location:  {location}");
                println!();
            }
        }
    }

    println!("Reference: see one/knowledge/ontology.md for the complete specification");
    Ok(1)
}
