use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Valid type tables
// ---------------------------------------------------------------------------

/// Entity types recognized by the things dimension.
pub const THING_TYPES: &[&str] = &[
    // Core (people as things)
    "creator",
    "ai_clone",
    "audience_member",
    "organization",
    // Business agents
    "strategy_agent",
    "research_agent",
    "marketing_agent",
    "sales_agent",
    "service_agent",
    "design_agent",
    "engineering_agent",
    "finance_agent",
    "legal_agent",
    "intelligence_agent",
    // Content
    "blog_post",
    "video",
    "podcast",
    "social_post",
    "email",
    "course",
    "lesson",
    // Products
    "digital_product",
    "membership",
    "consultation",
    "nft",
    // Community
    "community",
    "conversation",
    "message",
    // Token
    "token",
    "token_contract",
    // Knowledge
    "knowledge_item",
    "embedding",
    // Platform
    "website",
    "landing_page",
    "template",
    "livestream",
    "recording",
    "media_asset",
    // Business
    "payment",
    "subscription",
    "invoice",
    "metric",
    "insight",
    "prediction",
    "report",
    // Auth session
    "session",
    "oauth_account",
    "verification_token",
    "password_reset_token",
    // UI preferences
    "ui_preferences",
    // Marketing
    "notification",
    "email_campaign",
    "announcement",
    "referral",
    "campaign",
    "lead",
    // External
    "external_agent",
    "external_workflow",
    "external_connection",
    // Protocol
    "mandate",
    "product",
    // Workflow
    "idea",
    "plan",
    "feature",
    "test",
    "design",
    "task",
];

/// Relationship types recognized by the connections dimension.
pub const CONNECTION_TYPES: &[&str] = &[
    // Ownership
    "owns",
    "created_by",
    // AI relationships
    "clone_of",
    "trained_on",
    "powers",
    // Content relationships
    "authored",
    "generated_by",
    "published_to",
    "part_of",
    "references",
    // Community relationships
    "member_of",
    "following",
    "moderates",
    "participated_in",
    // Product relationships
    "holds_tokens",
    "enrolled_in",
    "purchased",
    "subscribed_to",
    // Learning relationships
    "completed",
    "taught_by",
    "mentored_by",
];

/// Action types recognized by the events dimension.
pub const EVENT_TYPES: &[&str] = &[
    // Thing events
    "thing_created",
    "thing_updated",
    "thing_deleted",
    "thing_published",
    "thing_archived",
    // Connection events
    "connection_created",
    "connection_updated",
    "connection_deleted",
    // Knowledge events
    "knowledge_created",
    "knowledge_updated",
    "knowledge_deleted",
    "knowledge_embedded",
    // Content events
    "content_published",
    "content_viewed",
    "content_liked",
    "content_commented",
    // Community events
    "user_joined",
    "user_invited",
    "message_sent",
    "conversation_started",
    // Token events
    "tokens_minted",
    "tokens_burned",
    "tokens_transferred",
    "tokens_purchased",
    // Commerce events
    "payment_initiated",
    "payment_completed",
    "payment_failed",
    "subscription_created",
    "subscription_renewed",
    "subscription_cancelled",
    "purchase_completed",
    // Learning events
    "lesson_started",
    "lesson_completed",
    "course_enrolled",
    "course_completed",
    // AI events
    "clone_interacted",
    "ai_generated",
    "embedding_created",
    // Task events
    "task_created",
    "task_started",
    "task_completed",
    "task_failed",
    // Agent events
    "agent_started",
    "agent_completed",
    "agent_failed",
    "agent_executed",
    // Cycle events
    "cycle_started",
    "cycle_completed",
    "cycle_validated",
    "cycle_skipped",
    // Blockchain events
    "transaction_sent",
    "transaction_confirmed",
    "transaction_failed",
    "block_created",
    "contract_deployed",
    "contract_called",
    "token_minted",
    "token_burned",
    "token_transferred",
    "proposal_created",
    "proposal_voted",
    "proposal_executed",
    "delegation_created",
    "delegation_revoked",
    // System events
    "hook_executed",
    "insight_generated",
    "prediction_made",
    "metric_calculated",
];

/// Fields every record in a dimension table must carry.
pub const REQUIRED_METADATA: &[(&str, &[&str])] = &[
    ("groups", &["name", "type", "status"]),
    ("things", &["groupId", "type", "name", "status"]),
    ("connections", &["groupId", "type", "fromThingId", "toThingId"]),
    ("events", &["groupId", "type", "timestamp"]),
    ("knowledge", &["groupId", "content", "labels"]),
];

/// Tables whose inserts must be organization-scoped.
const SCOPED_TABLES: &[&str] = &["things", "connections", "events", "knowledge"];

const CONNECTION_PREFIXES: &[&str] = &[
    "owns", "created", "member", "following", "holds", "enrolled", "purchased",
];

const EVENT_SUFFIXES: &[&str] = &[
    "_created", "_updated", "_deleted", "_completed", "_failed", "_started",
];

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct OntologyFinding {
    /// 1-based line of the offending literal; 0 for file-level findings.
    pub line: usize,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

static TYPE_LITERAL_RE: OnceLock<Regex> = OnceLock::new();
static CONNECTION_TYPE_RE: OnceLock<Regex> = OnceLock::new();
static EVENT_TYPE_RE: OnceLock<Regex> = OnceLock::new();
static FRONTEND_CONVEX_RE: OnceLock<Regex> = OnceLock::new();

fn type_literal_re() -> &'static Regex {
    TYPE_LITERAL_RE.get_or_init(|| Regex::new(r#"type:\s*["']([^"']+)["']"#).unwrap())
}

fn connection_type_re() -> &'static Regex {
    CONNECTION_TYPE_RE
        .get_or_init(|| Regex::new(r#"(?:connectionType|type):\s*["']([^"']+)["']"#).unwrap())
}

fn event_type_re() -> &'static Regex {
    EVENT_TYPE_RE
        .get_or_init(|| Regex::new(r#"(?:eventType|type):\s*["']([^"']+)["']"#).unwrap())
}

fn frontend_convex_re() -> &'static Regex {
    FRONTEND_CONVEX_RE.get_or_init(|| Regex::new(r#"from\s+["'](?:@/)?convex/"#).unwrap())
}

fn is_backend(path: &str) -> bool {
    path.contains("backend/convex") || path.contains("web/src/services")
}

fn is_frontend(path: &str) -> bool {
    path.contains("web/src/")
}

/// Whether the validator has anything to say about this file.
pub fn applies_to(path: &str) -> bool {
    let typescript = path.ends_with(".ts") || path.ends_with(".tsx");
    if !typescript || path.contains("_generated") || path.contains(".test.") {
        return false;
    }
    is_backend(path) || is_frontend(path)
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// Validate a file's content against the ontology type tables. Files the
/// validator does not apply to yield no findings.
pub fn validate(path: &str, content: &str) -> Vec<OntologyFinding> {
    let mut findings = Vec::new();
    if !applies_to(path) {
        return findings;
    }

    if is_backend(path) {
        check_thing_types(content, &mut findings);
        if path.contains("connections") || content.to_lowercase().contains("connection") {
            check_connection_types(content, &mut findings);
        }
        if path.contains("events") || content.to_lowercase().contains("event") {
            check_event_types(content, &mut findings);
        }
        check_group_scoping(content, &mut findings);
    }

    if is_frontend(path)
        && !path.contains("src/services")
        && !path.contains("src/providers")
        && frontend_convex_re().is_match(content)
    {
        findings.push(OntologyFinding {
            line: 0,
            message: "Direct Convex import in component (use the services layer)".to_string(),
        });
    }

    findings
}

fn check_thing_types(content: &str, findings: &mut Vec<OntologyFinding>) {
    for cap in type_literal_re().captures_iter(content) {
        let m = cap.get(1).unwrap();
        let t = m.as_str();
        if THING_TYPES.contains(&t) {
            continue;
        }
        findings.push(OntologyFinding {
            line: line_of(content, m.start()),
            message: format!("Invalid thing type: '{t}'"),
        });
    }
}

fn check_connection_types(content: &str, findings: &mut Vec<OntologyFinding>) {
    for cap in connection_type_re().captures_iter(content) {
        let m = cap.get(1).unwrap();
        let t = m.as_str();
        if t.contains('_')
            && !CONNECTION_TYPES.contains(&t)
            && CONNECTION_PREFIXES.iter().any(|p| t.starts_with(p))
        {
            findings.push(OntologyFinding {
                line: line_of(content, m.start()),
                message: format!("Invalid connection type: '{t}'"),
            });
        }
    }
}

fn check_event_types(content: &str, findings: &mut Vec<OntologyFinding>) {
    for cap in event_type_re().captures_iter(content) {
        let m = cap.get(1).unwrap();
        let t = m.as_str();
        if t.contains('_')
            && !EVENT_TYPES.contains(&t)
            && EVENT_SUFFIXES.iter().any(|s| t.ends_with(s))
        {
            findings.push(OntologyFinding {
                line: line_of(content, m.start()),
                message: format!("Invalid event type: '{t}'"),
            });
        }
    }
}

fn check_group_scoping(content: &str, findings: &mut Vec<OntologyFinding>) {
    if !content.contains("ctx.db.insert") && !content.contains("ctx.db.query") {
        return;
    }
    if content.contains("groupId") {
        return;
    }
    for table in SCOPED_TABLES {
        let needle_double = format!("ctx.db.insert(\"{table}\"");
        let needle_single = format!("ctx.db.insert('{table}'");
        if content.contains(&needle_double) || content.contains(&needle_single) {
            findings.push(OntologyFinding {
                line: 0,
                message: format!(
                    "{} table insert missing 'groupId' (multi-tenant isolation required)",
                    capitalize(table)
                ),
            });
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
