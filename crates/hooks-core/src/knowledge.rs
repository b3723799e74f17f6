use crate::classify;
use crate::error::{HookError, Result};
use crate::io::append_line;
use crate::paths::KNOWLEDGE_LOG_DIR;
use crate::tracker::CycleState;
use crate::types::ArtifactKind;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

const PREVIEW_CHARS: usize = 500;

/// Tools whose artifacts get recorded.
const RECORDED_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit"];

/// Path fragments that mark throwaway or generated artifacts.
const IGNORED_FRAGMENTS: &[&str] = &["/tmp/", "/.temp/", "/_generated/", "/node_modules/"];

// ---------------------------------------------------------------------------
// KnowledgeEntry
// ---------------------------------------------------------------------------

/// One line of the append-only knowledge log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub artifact_type: ArtifactKind,
    pub file_path: String,
    pub file_name: String,
    pub labels: Vec<String>,
    /// First 16 hex chars of the SHA-256 of the file content; empty when the
    /// file could not be read.
    pub content_hash: String,
    pub created_at: String,
    pub cycle: u32,
    pub feature: String,
    pub organization: String,
    pub created_by_role: String,
    pub file_size: u64,
    pub directory: String,
    pub extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
}

// ---------------------------------------------------------------------------
// Recording decisions
// ---------------------------------------------------------------------------

/// Whether this tool invocation produced an artifact worth recording.
pub fn should_record(file_path: &str, tool_name: &str) -> bool {
    if !RECORDED_TOOLS.contains(&tool_name) {
        return false;
    }
    if IGNORED_FRAGMENTS.iter().any(|f| file_path.contains(f)) {
        return false;
    }
    let file_name = Path::new(file_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    classify::resolve_artifact(file_name).is_some()
}

pub fn content_hash(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..16].to_string()
}

/// Build an entry for an artifact. `content` is the tool-supplied content
/// when available; otherwise the file is read best-effort and gaps are left
/// empty rather than failing.
pub fn entry_for(file_path: &str, content: Option<&str>, state: &CycleState) -> KnowledgeEntry {
    let path = Path::new(file_path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let classification = classify::classify(file_path, content);

    let on_disk = content.is_none().then(|| std::fs::read(path).ok()).flatten();
    let hash = match (content, &on_disk) {
        (Some(c), _) => content_hash(c.as_bytes()),
        (None, Some(bytes)) => content_hash(bytes),
        (None, None) => String::new(),
    };
    let preview = match (content, &on_disk) {
        (Some(c), _) => Some(c.chars().take(PREVIEW_CHARS).collect()),
        (None, Some(bytes)) => std::str::from_utf8(bytes)
            .ok()
            .map(|c| c.chars().take(PREVIEW_CHARS).collect()),
        (None, None) => None,
    };
    let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    KnowledgeEntry {
        kind: "knowledge_item".to_string(),
        artifact_type: classification.artifact.unwrap_or(ArtifactKind::Code),
        file_path: file_path.to_string(),
        file_name,
        labels: classification.labels,
        content_hash: hash,
        created_at: Utc::now().to_rfc3339(),
        cycle: state.current_cycle,
        feature: state.feature_name.clone(),
        organization: state.organization.clone(),
        created_by_role: state.person_role.clone(),
        file_size,
        directory: path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
        content_preview: preview,
    }
}

// ---------------------------------------------------------------------------
// Log persistence
// ---------------------------------------------------------------------------

/// Per-user knowledge log directory (`~/.claude/knowledge-log/`).
pub fn log_dir() -> Result<PathBuf> {
    let base = home::home_dir().ok_or(HookError::HomeNotFound)?;
    Ok(base.join(KNOWLEDGE_LOG_DIR))
}

/// Append one entry to today's JSONL log file. Returns the log path.
pub fn append(dir: &Path, entry: &KnowledgeEntry) -> Result<PathBuf> {
    let file = dir.join(format!("knowledge-{}.jsonl", Utc::now().format("%Y-%m-%d")));
    let line = serde_json::to_string(entry)?;
    append_line(&file, &line)?;
    Ok(file)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn records_only_write_tools() {
        assert!(should_record("one/things/doc.md", "Write"));
        assert!(should_record("web/src/app.ts", "Edit"));
        assert!(!should_record("one/things/doc.md", "Read"));
        assert!(!should_record("one/things/doc.md", "Bash"));
    }

    #[test]
    fn skips_temporary_and_generated_paths() {
        assert!(!should_record("/tmp/scratch.md", "Write"));
        assert!(!should_record("app/node_modules/x/index.js", "Write"));
        assert!(!should_record("backend/convex/_generated/api.ts", "Write"));
    }

    #[test]
    fn skips_unknown_artifact_kinds() {
        assert!(!should_record("target/release/binary.exe", "Write"));
    }

    #[test]
    fn hash_is_16_hex_chars() {
        let h = content_hash(b"hello");
        assert_eq!(h.len(), 16);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(h, content_hash(b"hello"));
        assert_ne!(h, content_hash(b"world"));
    }

    #[test]
    fn entry_uses_supplied_content() {
        let state = CycleState::default();
        let entry = entry_for("one/things/token.md", Some("# Token\ncontent"), &state);
        assert_eq!(entry.kind, "knowledge_item");
        assert_eq!(entry.artifact_type, ArtifactKind::Documentation);
        assert_eq!(entry.file_name, "token.md");
        assert_eq!(entry.extension, ".md");
        assert!(!entry.content_hash.is_empty());
        assert_eq!(entry.content_preview.as_deref(), Some("# Token\ncontent"));
        assert_eq!(entry.cycle, 1);
    }

    #[test]
    fn entry_degrades_when_file_missing() {
        let state = CycleState::default();
        let entry = entry_for("one/things/never-written.md", None, &state);
        assert!(entry.content_hash.is_empty());
        assert!(entry.content_preview.is_none());
        assert_eq!(entry.file_size, 0);
    }

    #[test]
    fn append_writes_one_line_per_entry() {
        let dir = TempDir::new().unwrap();
        let state = CycleState::default();
        let entry = entry_for("one/things/doc.md", Some("body"), &state);

        let file = append(dir.path(), &entry).unwrap();
        append(dir.path(), &entry).unwrap();

        let content = std::fs::read_to_string(&file).unwrap();
        assert_eq!(content.lines().count(), 2);
        let parsed: KnowledgeEntry = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.file_name, "doc.md");
    }
}
