use crate::types::Dimension;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ONE_DIR: &str = "one";
pub const STATE_DIR: &str = ".claude/state";
pub const HOOKS_DIR: &str = ".claude/hooks";
pub const STATE_FILE: &str = ".claude/state/cycle.json";
pub const KNOWLEDGE_LOG_DIR: &str = ".claude/knowledge-log";

/// The only markdown files allowed at the managed root.
pub const ALLOWED_ROOT_MARKDOWN: &[&str] = &[
    "README.md",
    "LICENSE.md",
    "SECURITY.md",
    "CLAUDE.md",
    "AGENTS.md",
];

/// Infrastructure directories skipped by every sweep.
pub const SKIP_DIRS: &[&str] = &[
    ".git",
    ".obsidian",
    ".claude",
    "node_modules",
    ".vscode",
    ".github",
];

/// Root-level directories that are infrastructure, not installation folders.
pub const INFRA_DIRS: &[&str] = &[
    "web", "backend", "apps", "cli", "scripts", "docs", "media", "import", "one",
];

/// Extensions governed by the kebab-case filename convention.
pub const MANAGED_EXTENSIONS: &[&str] = &["md", "yaml", "yml", "json"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn one_dir(root: &Path) -> PathBuf {
    root.join(ONE_DIR)
}

pub fn dimension_dir(root: &Path, dim: Dimension) -> PathBuf {
    one_dir(root).join(dim.as_str())
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn events_dir(root: &Path) -> PathBuf {
    dimension_dir(root, Dimension::Events)
}

/// True when the sweep should descend into this directory.
pub fn enter_dir(name: &str) -> bool {
    !SKIP_DIRS.contains(&name)
}

/// True when the file extension is governed by the naming convention.
pub fn is_managed_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| MANAGED_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Kebab-case validation
// ---------------------------------------------------------------------------

static KEBAB_FILE_RE: OnceLock<Regex> = OnceLock::new();
static KEBAB_FOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn kebab_file_re() -> &'static Regex {
    KEBAB_FILE_RE
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*\.(md|yaml|yml|json)$").unwrap())
}

fn kebab_folder_re() -> &'static Regex {
    KEBAB_FOLDER_RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

pub fn is_kebab_file(name: &str) -> bool {
    kebab_file_re().is_match(name)
}

pub fn is_kebab_folder(name: &str) -> bool {
    kebab_folder_re().is_match(name)
}

/// Suggest a kebab-case name: lowercase, runs of characters outside
/// `[a-z0-9.]` become a single hyphen, edge hyphens dropped. Idempotent, and
/// the identity on names that already satisfy [`is_kebab_file`].
pub fn kebabify(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut pending_hyphen = false;
    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
