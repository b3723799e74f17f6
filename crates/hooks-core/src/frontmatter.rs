use crate::classify::TAG_KEYWORDS;
use crate::types::Dimension;
use chrono::Utc;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// DocMeta
// ---------------------------------------------------------------------------

/// The metadata front-matter block every managed document carries.
#[derive(Debug, Clone, PartialEq)]
pub struct DocMeta {
    pub title: String,
    pub dimension: Dimension,
    pub category: String,
    pub tags: Vec<String>,
    pub created: String,
    pub updated: String,
    pub version: String,
    pub ai_context: String,
}

pub const REQUIRED_FIELDS: &[&str] = &[
    "title",
    "dimension",
    "category",
    "tags",
    "created",
    "updated",
    "version",
    "ai_context",
];

/// Subdirectory → category overrides; unmapped subdirectories pass through.
const CATEGORY_MAP: &[(&str, &str)] = &[
    ("agents", "agents"),
    ("plans", "plans"),
    ("products", "products"),
    ("features", "features"),
    ("components", "components"),
    ("examples", "examples"),
    ("claude", "agents"),
    ("protocols", "protocols"),
    ("workflows", "workflows"),
];

const MAX_TAGS: usize = 7;
const CONTENT_SAMPLE_CHARS: usize = 500;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

pub fn has_front_matter(content: &str) -> bool {
    split(content).is_some()
}

/// Split a document into its raw front-matter block and body. Returns `None`
/// when the document has no well-delimited block.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---\n")?;
    let end = rest.find("\n---\n")?;
    Some((&rest[..end], &rest[end + 5..]))
}

/// Parse the front-matter block into a key → value map. Malformed YAML is
/// treated as absent metadata rather than an error.
pub fn parse(content: &str) -> Option<BTreeMap<String, Value>> {
    let (block, _) = split(content)?;
    serde_yaml::from_str::<BTreeMap<String, Value>>(block).ok()
}

pub fn is_complete(meta: &BTreeMap<String, Value>) -> bool {
    REQUIRED_FIELDS.iter().all(|f| meta.contains_key(*f))
}

fn value_str(meta: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    meta.get(key).and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn existing_tags(meta: &BTreeMap<String, Value>) -> Vec<String> {
    match meta.get("tags") {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(s)) => s
            .trim_matches(|c| c == '[' || c == ']')
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate metadata for a document at `rel_path` (relative to the project
/// root), preserving title/created/version from any existing block.
pub fn generate(
    rel_path: &Path,
    content: &str,
    existing: Option<&BTreeMap<String, Value>>,
) -> DocMeta {
    let parts: Vec<&str> = rel_path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();

    let dimension = parts
        .get(1)
        .and_then(|p| p.parse::<Dimension>().ok())
        .unwrap_or(Dimension::Knowledge);

    let category = if parts.len() > 3 {
        let subdir = parts[2];
        CATEGORY_MAP
            .iter()
            .find(|(k, _)| *k == subdir)
            .map(|(_, v)| v.to_string())
            .unwrap_or_else(|| subdir.to_string())
    } else {
        "general".to_string()
    };

    let stem = rel_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let today = Utc::now().format("%Y-%m-%d").to_string();
    let title = existing
        .and_then(|m| value_str(m, "title"))
        .unwrap_or_else(|| title_case(stem));
    let created = existing
        .and_then(|m| value_str(m, "created"))
        .unwrap_or_else(|| today.clone());
    let version = existing
        .and_then(|m| value_str(m, "version"))
        .unwrap_or_else(|| "1.0.0".to_string());

    let tags = infer_tags(stem, content, existing);
    let ai_context = generate_ai_context(rel_path, stem, dimension, &category, content);

    DocMeta {
        title,
        dimension,
        category,
        tags,
        created,
        updated: today,
        version,
        ai_context,
    }
}

fn title_case(stem: &str) -> String {
    stem.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tags: any the document already carries, the first two tags for keywords
/// in the file stem, the primary tag for keywords in the content sample.
/// Capped at seven, sorted.
pub fn infer_tags(
    stem: &str,
    content: &str,
    existing: Option<&BTreeMap<String, Value>>,
) -> Vec<String> {
    let mut tags: std::collections::BTreeSet<String> = existing
        .map(existing_tags)
        .unwrap_or_default()
        .into_iter()
        .collect();

    let stem_lower = stem.to_lowercase();
    for (keyword, keyword_tags) in TAG_KEYWORDS {
        if stem_lower.contains(keyword) {
            tags.extend(keyword_tags.iter().take(2).map(|t| t.to_string()));
        }
    }

    let sample: String = content
        .chars()
        .take(CONTENT_SAMPLE_CHARS)
        .collect::<String>()
        .to_lowercase();
    for (keyword, keyword_tags) in TAG_KEYWORDS {
        if sample.contains(keyword) {
            if let Some(primary) = keyword_tags.first() {
                tags.insert(primary.to_string());
            }
        }
    }

    tags.into_iter().take(MAX_TAGS).collect()
}

fn generate_ai_context(
    rel_path: &Path,
    stem: &str,
    dimension: Dimension,
    category: &str,
    content: &str,
) -> String {
    let purpose = content
        .lines()
        .find_map(|line| line.strip_prefix("# ").map(str::trim))
        .map(|heading| format!("Documents {}", heading.to_lowercase()))
        .or_else(|| {
            content
                .lines()
                .find(|l| l.starts_with(|c: char| c.is_ascii_uppercase()) && l.contains('.'))
                .map(|l| l.chars().take(100).collect())
        })
        .unwrap_or_else(|| "Provides information".to_string());

    format!(
        "This document is part of the {dimension} dimension in the {category} category.\n\
         Location: {}\n\
         Purpose: {purpose}\n\
         For AI agents: Read this to understand {}.",
        rel_path.display(),
        stem.replace('-', " ")
    )
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the front-matter block, closing delimiter and trailing blank line
/// included.
pub fn render(meta: &DocMeta) -> String {
    let indented_context: String = meta
        .ai_context
        .lines()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "---\n\
         title: {}\n\
         dimension: {}\n\
         category: {}\n\
         tags: [{}]\n\
         created: {}\n\
         updated: {}\n\
         version: {}\n\
         ai_context: |\n{}\n\
         ---\n\n",
        meta.title,
        meta.dimension,
        meta.category,
        meta.tags.join(", "),
        meta.created,
        meta.updated,
        meta.version,
        indented_context,
    )
}

/// Prepend metadata to a bare document, or replace an existing block while
/// preserving the body.
pub fn apply(content: &str, meta: &DocMeta) -> String {
    let body = split(content).map(|(_, body)| body).unwrap_or(content);
    format!("{}{}", render(meta), body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
