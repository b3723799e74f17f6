use crate::output::RULE;
use anyhow::Context as _;
use hooks_core::tagger::{TagAction, Tagger};
use std::path::Path;

pub fn run(root: &Path, dry_run: bool, verbose: bool) -> anyhow::Result<i32> {
    println!("{RULE}");
    println!("METADATA TAGGING");
    println!("{RULE}");
    if dry_run {
        println!("[dry run - no files will be modified]");
    }
    println!();

    let (outcomes, stats) = Tagger::new(root, dry_run)
        .run()
        .context("tagging sweep failed")?;

    for outcome in &outcomes {
        match outcome.action {
            TagAction::Tagged => println!("Tagged:  {}", outcome.path),
            TagAction::Updated => println!("Updated: {}", outcome.path),
            TagAction::Skipped => {
                if verbose {
                    println!("Skipped: {} (already has complete metadata)", outcome.path);
                }
            }
            TagAction::Failed => println!("Failed:  {}", outcome.path),
        }
    }

    println!();
    println!("{RULE}");
    println!("Files processed: {}", stats.processed);
    println!("Files tagged:    {}", stats.tagged);
    println!("Files updated:   {}", stats.updated);
    println!("Files skipped:   {}", stats.skipped);
    if stats.failed > 0 {
        println!("Files failed:    {}", stats.failed);
    }
    println!("{RULE}");
    if dry_run {
        println!();
        println!("[dry run] No files were actually modified. Run without --dry-run to apply.");
    }

    Ok(0)
}
