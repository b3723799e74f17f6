use crate::paths::{is_kebab_file, kebabify};
use crate::types::{ArtifactKind, Dimension};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Classification (output)
// ---------------------------------------------------------------------------

/// Result of classifying a single path. Plain value, recomputed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub dimension: Option<Dimension>,
    pub artifact: Option<ArtifactKind>,
    /// Sorted and deduplicated; deterministic for identical input.
    pub labels: Vec<String>,
    pub valid_name: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Static rule tables (first match wins, order matters)
// ---------------------------------------------------------------------------

/// Ordered (substring, dimension) rules for paths under the managed root.
const DIMENSION_RULES: &[(&str, Dimension)] = &[
    ("one/groups", Dimension::Groups),
    ("one/people", Dimension::People),
    ("one/things", Dimension::Things),
    ("one/connections", Dimension::Connections),
    ("one/events", Dimension::Events),
    ("one/knowledge", Dimension::Knowledge),
];

/// Ordered artifact kind table. Entries are either bare extensions
/// (`"md"`) or dotted suffixes (`"test.ts"`), checked in insertion order.
const ARTIFACT_RULES: &[(ArtifactKind, &[&str])] = &[
    (
        ArtifactKind::Code,
        &["py", "ts", "tsx", "js", "jsx", "astro", "json", "yaml", "yml"],
    ),
    (ArtifactKind::Documentation, &["md", "mdx", "txt"]),
    (
        ArtifactKind::Design,
        &["fig", "sketch", "svg", "png", "jpg"],
    ),
    (
        ArtifactKind::Test,
        &["test.ts", "test.tsx", "spec.ts", "spec.tsx"],
    ),
    (
        ArtifactKind::Config,
        &["json", "yaml", "yml", "toml", "ini"],
    ),
];

/// Labels attached when the path contains the pattern.
const LABEL_RULES: &[(&str, &[&str])] = &[
    ("/web/src/components", &["component", "frontend", "ui"]),
    ("/web/src/pages", &["page", "frontend", "routing"]),
    ("/backend/convex/queries", &["query", "backend", "database"]),
    (
        "/backend/convex/mutations",
        &["mutation", "backend", "database"],
    ),
    (
        "/backend/convex/services",
        &["service", "backend", "business-logic"],
    ),
    ("/one/things", &["documentation", "ontology", "things"]),
    (
        "/one/connections",
        &["documentation", "ontology", "connections"],
    ),
    ("/one/events", &["documentation", "ontology", "events"]),
    (
        "/one/knowledge",
        &["documentation", "ontology", "knowledge"],
    ),
    ("/test", &["test", "quality", "validation"]),
];

/// Content keyword table shared with the front-matter tagger: when the key
/// occurs in a file stem or content sample, the listed tags apply.
pub const TAG_KEYWORDS: &[(&str, &[&str])] = &[
    ("ai", &["ai", "artificial-intelligence", "machine-learning"]),
    ("agent", &["intelligence-agent", "ai-agent", "automation"]),
    ("ontology", &["ontology", "data-model", "schema"]),
    ("protocol", &["protocol", "specification", "interoperability"]),
    (
        "architecture",
        &["architecture", "system-design", "patterns"],
    ),
    ("frontend", &["frontend", "ui", "components", "react"]),
    ("backend", &["backend", "convex", "database", "services"]),
    ("blockchain", &["blockchain", "crypto", "web3", "sui", "solana"]),
    (
        "authentication",
        &["auth", "authentication", "authorization", "rbac"],
    ),
    ("testing", &["testing", "quality", "validation", "e2e"]),
];

/// Number of leading characters of content consulted for keyword labels.
const CONTENT_SAMPLE_CHARS: usize = 500;

// ---------------------------------------------------------------------------
// Resolvers
// ---------------------------------------------------------------------------

/// First dimension whose substring pattern occurs in the path. Paths outside
/// the managed root resolve to `None`, never an error.
pub fn resolve_dimension(path: &str) -> Option<Dimension> {
    let normalized = normalize(path);
    DIMENSION_RULES
        .iter()
        .find(|(pat, _)| normalized.contains(pat))
        .map(|(_, dim)| *dim)
}

/// First artifact kind whose suffix list matches the file name. Names
/// containing `test` or `spec` short-circuit to [`ArtifactKind::Test`].
pub fn resolve_artifact(file_name: &str) -> Option<ArtifactKind> {
    if file_name.contains("test") || file_name.contains("spec") {
        return Some(ArtifactKind::Test);
    }
    let ext = Path::new(file_name).extension().and_then(|e| e.to_str());
    for (kind, suffixes) in ARTIFACT_RULES {
        for suffix in *suffixes {
            let hit = if suffix.contains('.') {
                file_name.ends_with(suffix)
            } else {
                ext == Some(*suffix)
            };
            if hit {
                return Some(*kind);
            }
        }
    }
    None
}

/// Classify a path, optionally consulting file content for keyword labels.
/// Pure and infallible: unknown paths yield `None` fields, absent content
/// simply skips content labeling.
pub fn classify(path: &str, content: Option<&str>) -> Classification {
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dimension = resolve_dimension(path);
    let artifact = resolve_artifact(&file_name);

    let mut labels: BTreeSet<String> = BTreeSet::new();
    let normalized = normalize(path);
    for (pattern, rule_labels) in LABEL_RULES {
        if normalized.contains(pattern) {
            labels.extend(rule_labels.iter().map(|l| l.to_string()));
        }
    }
    if let Some(dim) = dimension {
        labels.insert(dim.label());
    }
    if let Some(kind) = artifact {
        labels.insert(kind.as_str().to_string());
    }
    if let Some(content) = content {
        let sample: String = content
            .chars()
            .take(CONTENT_SAMPLE_CHARS)
            .collect::<String>()
            .to_lowercase();
        for (keyword, tags) in TAG_KEYWORDS {
            if sample.contains(keyword) {
                if let Some(primary) = tags.first() {
                    labels.insert(primary.to_string());
                }
            }
        }
    }

    let valid_name = is_kebab_file(&file_name);
    let suggested_name = if valid_name || file_name.is_empty() {
        None
    } else {
        Some(kebabify(&file_name))
    };

    Classification {
        dimension,
        artifact,
        labels: labels.into_iter().collect(),
        valid_name,
        suggested_name,
    }
}

/// Prefix a leading slash so patterns anchored at a path boundary match both
/// absolute and repo-relative inputs.
fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    if unified.starts_with('/') {
        unified
    } else {
        format!("/{unified}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_thing_doc() {
        let c = classify("one/things/blog-post.md", None);
        assert_eq!(c.dimension, Some(Dimension::Things));
        assert_eq!(c.artifact, Some(ArtifactKind::Documentation));
        assert!(c.valid_name);
        assert!(c.suggested_name.is_none());
        assert!(c.labels.contains(&"dimension-things".to_string()));
        assert!(c.labels.contains(&"ontology".to_string()));
    }

    #[test]
    fn invalid_dimension_folder_yields_none() {
        // Wrong-case dimension folders never match the rule table.
        let c = classify("one/Knowledge/My Doc.MD", None);
        assert_eq!(c.dimension, None);
        assert!(!c.valid_name);
        assert_eq!(c.suggested_name.as_deref(), Some("my-doc.md"));
    }

    #[test]
    fn out_of_scope_path_is_unclassified() {
        let c = classify("/etc/passwd", None);
        assert_eq!(c.dimension, None);
        assert_eq!(c.artifact, None);
    }

    #[test]
    fn test_files_short_circuit() {
        assert_eq!(
            resolve_artifact("auth.test.ts"),
            Some(ArtifactKind::Test)
        );
        assert_eq!(resolve_artifact("login.spec.tsx"), Some(ArtifactKind::Test));
        // "test" anywhere in the name wins over the extension table
        assert_eq!(resolve_artifact("test-data.json"), Some(ArtifactKind::Test));
    }

    #[test]
    fn artifact_table_first_match_wins() {
        // json is listed under both code and config; code comes first
        assert_eq!(resolve_artifact("schema.json"), Some(ArtifactKind::Code));
        assert_eq!(resolve_artifact("readme.md"), Some(ArtifactKind::Documentation));
        assert_eq!(resolve_artifact("settings.toml"), Some(ArtifactKind::Config));
        assert_eq!(resolve_artifact("logo.svg"), Some(ArtifactKind::Design));
        assert_eq!(resolve_artifact("binary.exe"), None);
    }

    #[test]
    fn extension_match_is_exact_not_suffix() {
        // "notes" must not match the bare "ts" extension entry
        assert_eq!(resolve_artifact("notes"), None);
    }

    #[test]
    fn absolute_and_relative_paths_agree() {
        let rel = classify("one/knowledge/rag.md", None);
        let abs = classify("/home/dev/proj/one/knowledge/rag.md", None);
        assert_eq!(rel.dimension, abs.dimension);
        assert_eq!(rel.labels, abs.labels);
    }

    #[test]
    fn content_keywords_add_labels() {
        let c = classify(
            "one/knowledge/search.md",
            Some("This covers the ontology and backend services."),
        );
        assert!(c.labels.contains(&"ontology".to_string()));
        assert!(c.labels.contains(&"backend".to_string()));

        let without = classify("one/knowledge/search.md", None);
        assert!(without.labels.len() <= c.labels.len());
    }

    #[test]
    fn labels_are_sorted_and_deduplicated() {
        let c = classify("web/src/components/test-button.tsx", None);
        let mut sorted = c.labels.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(c.labels, sorted);
    }

    #[test]
    fn frontend_path_labels() {
        let c = classify("/proj/web/src/components/button.tsx", None);
        assert!(c.labels.contains(&"component".to_string()));
        assert!(c.labels.contains(&"frontend".to_string()));
        assert_eq!(c.artifact, Some(ArtifactKind::Code));
    }
}
