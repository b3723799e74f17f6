use crate::paths::{
    self, is_kebab_file, is_kebab_folder, kebabify, INFRA_DIRS, SKIP_DIRS,
};
use crate::types::Dimension;
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NamingFinding {
    /// A directory under `one/` that is not one of the six dimensions.
    InvalidDimension { path: String, dimension: String },
    /// A managed file that violates the kebab-case convention.
    InvalidFilename {
        path: String,
        filename: String,
        suggested: String,
        /// Where it was found: `ontology` or `installation: <name>`.
        location: String,
    },
}

// ---------------------------------------------------------------------------
// Scans
// ---------------------------------------------------------------------------

/// Validate that `one/` contains only the six dimension directories.
pub fn scan_dimension_dirs(root: &Path) -> Vec<NamingFinding> {
    let mut findings = Vec::new();
    let one = paths::one_dir(root);
    let Ok(entries) = std::fs::read_dir(&one) else {
        return findings;
    };
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if SKIP_DIRS.contains(&name.as_ref()) {
            continue;
        }
        if name.parse::<Dimension>().is_err() {
            findings.push(NamingFinding::InvalidDimension {
                path: entry.path().to_string_lossy().into_owned(),
                dimension: name.into_owned(),
            });
        }
    }
    findings
}

/// Check kebab-case naming for managed files under `one/` and under any
/// installation folder at the root.
pub fn scan_filenames(root: &Path) -> Vec<NamingFinding> {
    let mut findings = Vec::new();
    sweep_dir(root, &paths::one_dir(root), "ontology", &mut findings);

    let Ok(entries) = std::fs::read_dir(root) else {
        return findings;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if entry.path().is_dir() && is_installation_folder(&name) {
            let location = format!("installation: {name}");
            sweep_dir(root, &entry.path(), &location, &mut findings);
        }
    }
    findings
}

/// Both scans combined, dimension findings first.
pub fn scan(root: &Path) -> Vec<NamingFinding> {
    let mut findings = scan_dimension_dirs(root);
    findings.extend(scan_filenames(root));
    findings
}

fn sweep_dir(root: &Path, dir: &Path, location: &str, findings: &mut Vec<NamingFinding>) {
    for path in crate::io::walk_files(dir, &|p| {
        p.file_name()
            .and_then(|n| n.to_str())
            .map(paths::is_managed_file)
            .unwrap_or(false)
    }) {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_kebab_file(filename) {
            let rel = path.strip_prefix(root).unwrap_or(&path);
            findings.push(NamingFinding::InvalidFilename {
                path: rel.to_string_lossy().into_owned(),
                filename: filename.to_string(),
                suggested: kebabify(filename),
                location: location.to_string(),
            });
        }
    }
}

/// A root-level directory is an installation folder when it follows the
/// lowercase-hyphen convention and is neither infrastructure nor skipped.
pub fn is_installation_folder(name: &str) -> bool {
    if INFRA_DIRS.contains(&name) || SKIP_DIRS.contains(&name) {
        return false;
    }
    is_kebab_folder(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
