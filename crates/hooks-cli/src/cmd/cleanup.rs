use crate::output::print_json;
use anyhow::Context as _;
use hooks_core::cleanup;
use std::path::Path;

pub fn run(root: &Path, dry_run: bool, json: bool) -> anyhow::Result<i32> {
    let report = cleanup::clean_root(root, dry_run).context("root cleanup failed")?;

    if json {
        print_json(&report)?;
        return Ok(0);
    }

    if !report.moved.is_empty() {
        let verb = if dry_run { "Would move" } else { "Moved" };
        println!("{verb} {} files to one/events/:", report.moved.len());
        for file in &report.moved {
            println!("  - {file}");
        }
        println!();
    }

    if !report.kept.is_empty() {
        println!("Kept {} essential files in the root:", report.kept.len());
        for file in &report.kept {
            println!("  - {file}");
        }
    }

    if report.moved.is_empty() && report.failed.is_empty() {
        println!("Root is clean - all essential files preserved.");
    }

    for (file, reason) in &report.failed {
        println!("Failed to move {file}: {reason}");
    }

    Ok(0)
}
