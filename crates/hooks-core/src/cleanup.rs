use crate::error::Result;
use crate::io::ensure_dir;
use crate::paths::{self, ALLOWED_ROOT_MARKDOWN};
use serde::Serialize;
use std::path::Path;

/// Text files at the root that are infrastructure, not deliverables.
const KEEP_TXT: &[&str] = &["package-lock.txt", "robots.txt"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupReport {
    pub moved: Vec<String>,
    pub kept: Vec<String>,
    /// (file, reason) pairs for moves that failed; advisory only.
    pub failed: Vec<(String, String)>,
}

/// Move stray root markdown (and deliverable-looking text files) into
/// `one/events/`, leaving the approved set in place. With `dry_run` the
/// report lists what would move without touching anything.
pub fn clean_root(root: &Path, dry_run: bool) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();
    let events = paths::events_dir(root);
    if !dry_run {
        ensure_dir(&events)?;
    }

    let mut names: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(root)?.flatten() {
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    for name in names {
        let is_md = name.ends_with(".md");
        let is_txt = name.ends_with(".txt");
        if !is_md && !is_txt {
            continue;
        }
        if is_md && ALLOWED_ROOT_MARKDOWN.contains(&name.as_str()) {
            report.kept.push(name);
            continue;
        }
        if is_txt && KEEP_TXT.contains(&name.as_str()) {
            report.kept.push(name);
            continue;
        }

        if dry_run {
            report.moved.push(name);
            continue;
        }
        let from = root.join(&name);
        let to = events.join(&name);
        match std::fs::rename(&from, &to) {
            Ok(()) => report.moved.push(name),
            Err(e) => report.failed.push((name, e.to_string())),
        }
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
