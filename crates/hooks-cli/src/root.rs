use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--project-dir` flag / `CLAUDE_PROJECT_DIR` env var (passed as `explicit`)
/// 2. Walk upward from `cwd` looking for `one/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    for marker in ["one", ".git"] {
        let mut dir = cwd.clone();
        loop {
            if dir.join(marker).is_dir() {
                return dir;
            }
            match dir.parent() {
                Some(p) => dir = p.to_path_buf(),
                None => break,
            }
        }
    }

    cwd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn explicit_root_needs_no_markers() {
        let dir = TempDir::new().unwrap();
        // No one/ or .git/ inside; the explicit path is still respected.
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }
}
