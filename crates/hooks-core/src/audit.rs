use crate::frontmatter;
use crate::naming::{self, NamingFinding};
use crate::paths::{self, ALLOWED_ROOT_MARKDOWN, HOOKS_DIR, STATE_DIR};
use crate::types::{Dimension, Severity};
use serde::Serialize;
use std::path::Path;

pub const DEFAULT_BLOCK_THRESHOLD: u32 = 30;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditMetrics {
    pub root_violations: usize,
    pub misnamed_files: usize,
    pub orphaned_files: usize,
    pub files_without_metadata: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub issues: Vec<Issue>,
    /// Low-grade findings that only nudge the score.
    pub advisories: Vec<String>,
    pub metrics: AuditMetrics,
}

impl AuditReport {
    fn error(&mut self, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.issues.push(Issue {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    fn advise(&mut self, message: impl Into<String>) {
        self.advisories.push(message.into());
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Cleanliness score 0..=100: errors cost 10, warnings 5, advisories 2;
    /// clean metadata and a temp-file-free tree each earn 5 back.
    pub fn score(&self) -> u32 {
        let mut score: i64 = 100;
        for issue in &self.issues {
            score -= match issue.severity {
                Severity::Error => 10,
                Severity::Warning => 5,
            };
        }
        score -= 2 * self.advisories.len() as i64;
        if self.metrics.files_without_metadata == 0 {
            score += 5;
        }
        if self.metrics.orphaned_files == 0 {
            score += 5;
        }
        score.clamp(0, 100) as u32
    }

    /// Policy gate: block only when hard errors exist and the score has
    /// fallen under the threshold.
    pub fn should_block(&self, threshold: u32) -> bool {
        self.error_count() > 0 && self.score() < threshold
    }

    pub fn status_label(&self) -> &'static str {
        match self.score() {
            90..=100 => "Excellent",
            70..=89 => "Good",
            50..=69 => "Needs attention",
            _ => "Critical issues",
        }
    }
}

// ---------------------------------------------------------------------------
// Auditor
// ---------------------------------------------------------------------------

/// Run every cleanliness and structure check against the project root.
pub fn run(root: &Path) -> AuditReport {
    let mut report = AuditReport::default();
    check_required_dirs(root, &mut report);
    check_root_markdown(root, &mut report);
    check_dimension_dirs(root, &mut report);
    check_file_naming(root, &mut report);
    check_orphans(root, &mut report);
    check_metadata(root, &mut report);
    report
}

fn check_required_dirs(root: &Path, report: &mut AuditReport) {
    let mut required: Vec<String> = Dimension::all()
        .iter()
        .map(|d| format!("{}/{}", paths::ONE_DIR, d))
        .collect();
    required.push(HOOKS_DIR.to_string());
    required.push(STATE_DIR.to_string());

    for rel in required {
        let full = root.join(&rel);
        if !full.exists() {
            report.error(format!("Missing required ontology directory: {rel}"));
        } else if !full.is_dir() {
            report.error(format!("Path exists but is not a directory: {rel}"));
        }
    }
}

fn check_root_markdown(root: &Path, report: &mut AuditReport) {
    let mut violations: Vec<String> = Vec::new();
    let Ok(entries) = std::fs::read_dir(root) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if entry.path().is_file()
            && name.ends_with(".md")
            && !ALLOWED_ROOT_MARKDOWN.contains(&name.as_ref())
        {
            violations.push(name.into_owned());
        }
    }
    violations.sort();
    report.metrics.root_violations = violations.len();
    if !violations.is_empty() {
        report.error(format!(
            "Root directory contains {} unauthorized markdown files. Only {} are allowed. \
             Move these to one/<dimension>/: {}",
            violations.len(),
            ALLOWED_ROOT_MARKDOWN.join(", "),
            violations.join(", ")
        ));
    }
}

fn check_dimension_dirs(root: &Path, report: &mut AuditReport) {
    if !paths::one_dir(root).exists() {
        report.error("Missing one/ directory - ontology structure not found");
        return;
    }
    for finding in naming::scan_dimension_dirs(root) {
        if let NamingFinding::InvalidDimension { dimension, .. } = finding {
            report.advise(format!(
                "Unexpected directory in one/: '{dimension}'. Only the 6 dimensions are expected"
            ));
        }
    }
}

fn check_file_naming(root: &Path, report: &mut AuditReport) {
    let misnamed: Vec<String> = naming::scan_filenames(root)
        .into_iter()
        .filter_map(|f| match f {
            NamingFinding::InvalidFilename { path, .. } => Some(path),
            _ => None,
        })
        .collect();
    report.metrics.misnamed_files = misnamed.len();
    if !misnamed.is_empty() {
        let shown: Vec<&str> = misnamed.iter().take(5).map(String::as_str).collect();
        let mut msg = format!(
            "Files not following kebab-case convention: {}",
            shown.join(", ")
        );
        if misnamed.len() > 5 {
            msg.push_str(&format!(" ... and {} more", misnamed.len() - 5));
        }
        report.warning(msg);
    }
}

const ORPHAN_SUFFIXES: &[&str] = &[".tmp", ".swp", ".bak", "~"];

fn check_orphans(root: &Path, report: &mut AuditReport) {
    let orphans = crate::io::walk_files(root, &|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n == ".DS_Store" || ORPHAN_SUFFIXES.iter().any(|s| n.ends_with(s)))
            .unwrap_or(false)
    });
    report.metrics.orphaned_files = orphans.len();
    if !orphans.is_empty() {
        report.advise(format!(
            "Found {} temporary/backup files that should be cleaned",
            orphans.len()
        ));
        for orphan in orphans.iter().take(3) {
            let rel = orphan.strip_prefix(root).unwrap_or(orphan);
            report.advise(format!("  - {}", rel.display()));
        }
    }
}

fn check_metadata(root: &Path, report: &mut AuditReport) {
    let docs = crate::io::walk_files(&paths::one_dir(root), &|p| {
        p.extension().is_some_and(|e| e == "md")
    });
    let mut missing = 0usize;
    for doc in docs {
        match std::fs::read_to_string(&doc) {
            Ok(content) => {
                if !frontmatter::has_front_matter(&content) {
                    missing += 1;
                }
            }
            // Unreadable files are skipped, matching the advisory policy.
            Err(_) => continue,
        }
    }
    report.metrics.files_without_metadata = missing;
    if missing > 0 {
        report.advise(format!("{missing} files missing metadata tags"));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_clean_project(root: &Path) {
        for dim in Dimension::all() {
            std::fs::create_dir_all(paths::dimension_dir(root, *dim)).unwrap();
        }
        std::fs::create_dir_all(root.join(HOOKS_DIR)).unwrap();
        std::fs::create_dir_all(root.join(STATE_DIR)).unwrap();
    }

    #[test]
    fn clean_project_scores_high() {
        let dir = TempDir::new().unwrap();
        seed_clean_project(dir.path());
        let report = run(dir.path());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.score(), 100);
        assert_eq!(report.status_label(), "Excellent");
        assert!(!report.should_block(DEFAULT_BLOCK_THRESHOLD));
    }

    #[test]
    fn empty_dir_blocks_at_default_threshold() {
        let dir = TempDir::new().unwrap();
        let report = run(dir.path());
        // All eight required dirs plus one/ itself are missing
        assert!(report.error_count() >= 8);
        assert!(report.score() < DEFAULT_BLOCK_THRESHOLD);
        assert!(report.should_block(DEFAULT_BLOCK_THRESHOLD));
    }

    #[test]
    fn root_markdown_violations_counted() {
        let dir = TempDir::new().unwrap();
        seed_clean_project(dir.path());
        std::fs::write(dir.path().join("README.md"), "ok").unwrap();
        std::fs::write(dir.path().join("scratch-notes.md"), "stray").unwrap();
        std::fs::write(dir.path().join("demo-summary.md"), "stray").unwrap();

        let report = run(dir.path());
        assert_eq!(report.metrics.root_violations, 2);
        assert_eq!(report.error_count(), 1);
        let msg = &report.issues[0].message;
        assert!(msg.contains("demo-summary.md"));
        assert!(!msg.contains("README.md"));
    }

    #[test]
    fn score_clamps_at_zero() {
        let mut report = AuditReport::default();
        for i in 0..20 {
            report.error(format!("problem {i}"));
        }
        assert_eq!(report.score(), 0);
    }

    #[test]
    fn warnings_alone_never_block() {
        let mut report = AuditReport::default();
        for i in 0..30 {
            report.warning(format!("nit {i}"));
        }
        assert_eq!(report.score(), 0);
        assert!(!report.should_block(DEFAULT_BLOCK_THRESHOLD));
    }

    #[test]
    fn missing_metadata_is_advisory() {
        let dir = TempDir::new().unwrap();
        seed_clean_project(dir.path());
        std::fs::write(dir.path().join("one/things/bare.md"), "no front matter").unwrap();

        let report = run(dir.path());
        assert_eq!(report.metrics.files_without_metadata, 1);
        assert_eq!(report.error_count(), 0);
        assert!(report.score() < 100);
    }

    #[test]
    fn orphan_files_noted() {
        let dir = TempDir::new().unwrap();
        seed_clean_project(dir.path());
        std::fs::write(dir.path().join("one/things/draft.md.bak"), "x").unwrap();

        let report = run(dir.path());
        assert_eq!(report.metrics.orphaned_files, 1);
    }
}
