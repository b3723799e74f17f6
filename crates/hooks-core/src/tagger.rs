use crate::error::{HookError, Result};
use crate::frontmatter;
use crate::io::{atomic_write, walk_files};
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagAction {
    /// Metadata added to a document that had none.
    Tagged,
    /// Incomplete metadata regenerated.
    Updated,
    /// Complete metadata already present.
    Skipped,
    /// Unreadable or unwritable; advisory only.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagOutcome {
    pub path: String,
    pub action: TagAction,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TagStats {
    pub processed: usize,
    pub tagged: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl TagStats {
    fn record(&mut self, action: TagAction) {
        self.processed += 1;
        match action {
            TagAction::Tagged => self.tagged += 1,
            TagAction::Updated => self.updated += 1,
            TagAction::Skipped => self.skipped += 1,
            TagAction::Failed => self.failed += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Tagger
// ---------------------------------------------------------------------------

/// Sweeps `one/**/*.md`, adding or completing metadata front matter.
pub struct Tagger {
    root: PathBuf,
    dry_run: bool,
}

impl Tagger {
    pub fn new(root: &Path, dry_run: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            dry_run,
        }
    }

    /// Run the sweep. Fails only when the ontology root is missing entirely;
    /// per-file problems degrade to `Failed` outcomes.
    pub fn run(&self) -> Result<(Vec<TagOutcome>, TagStats)> {
        let one = paths::one_dir(&self.root);
        if !one.is_dir() {
            return Err(HookError::OntologyRootNotFound(
                self.root.display().to_string(),
            ));
        }

        let docs = walk_files(&one, &|p| p.extension().is_some_and(|e| e == "md"));
        let mut outcomes = Vec::with_capacity(docs.len());
        let mut stats = TagStats::default();

        for doc in docs {
            let action = self.process(&doc);
            stats.record(action);
            let rel = doc.strip_prefix(&self.root).unwrap_or(&doc);
            outcomes.push(TagOutcome {
                path: rel.to_string_lossy().into_owned(),
                action,
            });
        }
        Ok((outcomes, stats))
    }

    fn process(&self, doc: &Path) -> TagAction {
        let Ok(content) = std::fs::read_to_string(doc) else {
            return TagAction::Failed;
        };
        let existing = frontmatter::parse(&content);
        if let Some(ref meta) = existing {
            if frontmatter::is_complete(meta) {
                return TagAction::Skipped;
            }
        }

        let rel = doc.strip_prefix(&self.root).unwrap_or(doc);
        let meta = frontmatter::generate(rel, &content, existing.as_ref());
        let tagged = frontmatter::apply(&content, &meta);
        let action = if existing.is_some() {
            TagAction::Updated
        } else {
            TagAction::Tagged
        };

        if self.dry_run {
            return action;
        }
        match atomic_write(doc, tagged.as_bytes()) {
            Ok(()) => action,
            Err(_) => TagAction::Failed,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(root: &Path) {
        std::fs::create_dir_all(root.join("one/things")).unwrap();
        std::fs::create_dir_all(root.join("one/knowledge")).unwrap();
    }

    #[test]
    fn tags_bare_documents() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let doc = dir.path().join("one/things/blog-post.md");
        std::fs::write(&doc, "# Blog Post\n\nContent.\n").unwrap();

        let (outcomes, stats) = Tagger::new(dir.path(), false).run().unwrap();
        assert_eq!(stats.tagged, 1);
        assert_eq!(outcomes[0].action, TagAction::Tagged);

        let tagged = std::fs::read_to_string(&doc).unwrap();
        assert!(frontmatter::has_front_matter(&tagged));
        assert!(tagged.contains("dimension: things"));
        assert!(tagged.ends_with("# Blog Post\n\nContent.\n"));
    }

    #[test]
    fn skips_complete_metadata() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let doc = dir.path().join("one/knowledge/rag.md");
        std::fs::write(&doc, "# RAG\n").unwrap();

        Tagger::new(dir.path(), false).run().unwrap();
        let after_first = std::fs::read_to_string(&doc).unwrap();

        let (_, stats) = Tagger::new(dir.path(), false).run().unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.tagged, 0);
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), after_first);
    }

    #[test]
    fn updates_incomplete_metadata() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let doc = dir.path().join("one/things/course.md");
        std::fs::write(&doc, "---\ntitle: Course\n---\n\n# Course\n").unwrap();

        let (_, stats) = Tagger::new(dir.path(), false).run().unwrap();
        assert_eq!(stats.updated, 1);

        let tagged = std::fs::read_to_string(&doc).unwrap();
        // Existing title survives the regeneration
        assert!(tagged.contains("title: Course"));
        assert!(tagged.contains("version: 1.0.0"));
    }

    #[test]
    fn dry_run_leaves_files_untouched() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let doc = dir.path().join("one/things/draft.md");
        std::fs::write(&doc, "# Draft\n").unwrap();

        let (_, stats) = Tagger::new(dir.path(), true).run().unwrap();
        assert_eq!(stats.tagged, 1);
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), "# Draft\n");
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        assert!(Tagger::new(dir.path(), false).run().is_err());
    }
}
