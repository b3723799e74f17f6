use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn one_hooks(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("one-hooks").unwrap();
    cmd.current_dir(dir.path())
        .env("CLAUDE_PROJECT_DIR", dir.path());
    cmd
}

fn seed_ontology(dir: &TempDir) {
    for dim in [
        "groups",
        "people",
        "things",
        "connections",
        "events",
        "knowledge",
    ] {
        std::fs::create_dir_all(dir.path().join("one").join(dim)).unwrap();
    }
    std::fs::create_dir_all(dir.path().join(".claude/hooks")).unwrap();
    std::fs::create_dir_all(dir.path().join(".claude/state")).unwrap();
}

// ---------------------------------------------------------------------------
// one-hooks plan
// ---------------------------------------------------------------------------

#[test]
fn plan_lists_all_ten_phases() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase 1/10: Foundation & Setup"))
        .stdout(predicate::str::contains(
            "Phase 10/10: Deployment & Documentation",
        ))
        .stdout(predicate::str::contains(
            "Validate idea against 6-dimension ontology",
        ));
}

#[test]
fn plan_single_cycle_shows_descriptor() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .args(["plan", "--cycle", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update backend/convex/schema.ts"))
        .stdout(predicate::str::contains("Specialist: backend"));
}

#[test]
fn plan_out_of_range_cycle_is_sentinel_not_error() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .args(["plan", "--cycle", "400"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown task"));
}

#[test]
fn plan_json_emits_full_table() {
    let dir = TempDir::new().unwrap();
    let output = one_hooks(&dir)
        .args(["--json", "plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 100);
}

// ---------------------------------------------------------------------------
// one-hooks done
// ---------------------------------------------------------------------------

#[test]
fn done_materializes_and_advances_state() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .args(["done", "--lesson", "keep cycles small"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CYCLE COMPLETE: 1/100"))
        .stdout(predicate::str::contains("NEXT CYCLE: 2/100"));

    let state_file = dir.path().join(".claude/state/cycle.json");
    assert!(state_file.exists());
    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&state_file).unwrap()).unwrap();
    assert_eq!(state["current_cycle"], 2);
    assert_eq!(state["completed_cycles"], serde_json::json!([1]));
    assert_eq!(state["lessons_learned"][0]["lesson"], "keep cycles small");
}

#[test]
fn done_twice_advances_twice() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir).arg("done").assert().success();
    one_hooks(&dir).arg("done").assert().success();

    let state: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(".claude/state/cycle.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(state["current_cycle"], 3);
    assert_eq!(state["completed_cycles"], serde_json::json!([1, 2]));
}

// ---------------------------------------------------------------------------
// one-hooks context
// ---------------------------------------------------------------------------

#[test]
fn context_emits_additional_context_envelope() {
    let dir = TempDir::new().unwrap();
    let output = one_hooks(&dir)
        .arg("context")
        .write_stdin(r#"{"hook_event_name": "UserPromptSubmit", "prompt": "build the feature"}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ctx = parsed["hookSpecificOutput"]["additionalContext"]
        .as_str()
        .unwrap();
    assert!(ctx.contains("CURRENT CYCLE: 1/100"));
    assert_eq!(
        parsed["hookSpecificOutput"]["hookEventName"],
        "UserPromptSubmit"
    );
}

#[test]
fn context_skips_workflow_commands() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("context")
        .write_stdin(r#"{"prompt": "/done"}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn context_survives_malformed_event() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("context")
        .write_stdin("{definitely not json")
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// one-hooks check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_on_clean_tree() {
    let dir = TempDir::new().unwrap();
    seed_ontology(&dir);
    std::fs::write(dir.path().join("one/things/blog-post.md"), "x").unwrap();

    one_hooks(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("kebab-case naming convention"));
}

#[test]
fn check_flags_bad_names_and_exits_one() {
    let dir = TempDir::new().unwrap();
    seed_ontology(&dir);
    std::fs::write(dir.path().join("one/things/My Doc.MD"), "x").unwrap();

    one_hooks(&dir)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("My Doc.MD"))
        .stdout(predicate::str::contains("my-doc.md"));
}

// ---------------------------------------------------------------------------
// one-hooks audit
// ---------------------------------------------------------------------------

#[test]
fn audit_reports_but_exits_zero_without_gate() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("ONTOLOGY COMPLIANCE"))
        .stdout(predicate::str::contains("ERRORS:"));
}

#[test]
fn audit_gate_blocks_on_critical_issues() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .args(["audit", "--gate"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Blocked:"));
}

#[test]
fn audit_gate_passes_clean_project() {
    let dir = TempDir::new().unwrap();
    seed_ontology(&dir);
    one_hooks(&dir)
        .args(["audit", "--gate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Excellent"));
}

// ---------------------------------------------------------------------------
// one-hooks tag
// ---------------------------------------------------------------------------

#[test]
fn tag_adds_front_matter() {
    let dir = TempDir::new().unwrap();
    seed_ontology(&dir);
    let doc = dir.path().join("one/knowledge/vector-search.md");
    std::fs::write(&doc, "# Vector Search\n").unwrap();

    one_hooks(&dir)
        .arg("tag")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files tagged:    1"));

    let content = std::fs::read_to_string(&doc).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("dimension: knowledge"));
    assert!(content.ends_with("# Vector Search\n"));
}

#[test]
fn tag_dry_run_modifies_nothing() {
    let dir = TempDir::new().unwrap();
    seed_ontology(&dir);
    let doc = dir.path().join("one/things/token.md");
    std::fs::write(&doc, "# Token\n").unwrap();

    one_hooks(&dir)
        .args(["tag", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run"));

    assert_eq!(std::fs::read_to_string(&doc).unwrap(), "# Token\n");
}

#[test]
fn tag_without_ontology_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir).arg("tag").assert().code(1);
}

// ---------------------------------------------------------------------------
// one-hooks cleanup
// ---------------------------------------------------------------------------

#[test]
fn cleanup_moves_stray_docs_to_events() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("README.md"), "keep").unwrap();
    std::fs::write(dir.path().join("demo-results.md"), "move").unwrap();

    one_hooks(&dir)
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo-results.md"));

    assert!(dir.path().join("one/events/demo-results.md").exists());
    assert!(dir.path().join("README.md").exists());
}

// ---------------------------------------------------------------------------
// one-hooks imports
// ---------------------------------------------------------------------------

fn post_tool_event(file_path: &str, content: &str) -> String {
    serde_json::json!({
        "hook_event_name": "PostToolUse",
        "tool_name": "Write",
        "tool_input": {"file_path": file_path, "content": content}
    })
    .to_string()
}

#[test]
fn imports_blocks_frontend_backend_import() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("imports")
        .write_stdin(post_tool_event(
            "/proj/web/src/pages/index.tsx",
            r#"import { things } from "../../../backend/convex/things";"#,
        ))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Import validation failed"));
}

#[test]
fn imports_passes_clean_frontend_file() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("imports")
        .write_stdin(post_tool_event(
            "/proj/web/src/pages/index.tsx",
            r#"import { useQuery } from "convex/react";"#,
        ))
        .assert()
        .success();
}

#[test]
fn imports_ignores_non_source_files() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("imports")
        .write_stdin(post_tool_event("one/things/doc.md", "# Doc"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// one-hooks ontology
// ---------------------------------------------------------------------------

#[test]
fn ontology_blocks_invalid_thing_type() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("ontology")
        .write_stdin(post_tool_event(
            "backend/convex/things.ts",
            r#"await ctx.db.insert("things", { groupId, type: "flying_saucer" });"#,
        ))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("flying_saucer"));
}

#[test]
fn ontology_passes_valid_types() {
    let dir = TempDir::new().unwrap();
    one_hooks(&dir)
        .arg("ontology")
        .write_stdin(post_tool_event(
            "backend/convex/things.ts",
            r#"await ctx.db.insert("things", { groupId, type: "blog_post" });"#,
        ))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// one-hooks knowledge
// ---------------------------------------------------------------------------

#[test]
fn knowledge_appends_jsonl_entry() {
    let dir = TempDir::new().unwrap();
    let fake_home = TempDir::new().unwrap();

    one_hooks(&dir)
        .arg("knowledge")
        .env("HOME", fake_home.path())
        .write_stdin(post_tool_event("one/things/blog-post.md", "# Blog Post"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Knowledge tagged"))
        .stdout(predicate::str::contains("blog-post.md"));

    let log_dir = fake_home.path().join(".claude/knowledge-log");
    let logs: Vec<_> = std::fs::read_dir(&log_dir).unwrap().flatten().collect();
    assert_eq!(logs.len(), 1);
    let content = std::fs::read_to_string(logs[0].path()).unwrap();
    let entry: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(entry["type"], "knowledge_item");
    assert_eq!(entry["artifact_type"], "documentation");
}

#[test]
fn knowledge_ignores_read_tools() {
    let dir = TempDir::new().unwrap();
    let fake_home = TempDir::new().unwrap();

    one_hooks(&dir)
        .arg("knowledge")
        .env("HOME", fake_home.path())
        .write_stdin(
            serde_json::json!({
                "hook_event_name": "PostToolUse",
                "tool_name": "Read",
                "tool_input": {"file_path": "one/things/doc.md"}
            })
            .to_string(),
        )
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!fake_home.path().join(".claude/knowledge-log").exists());
}

// ---------------------------------------------------------------------------
// one-hooks guide
// ---------------------------------------------------------------------------

#[test]
fn guide_suggests_placement() {
    let dir = TempDir::new().unwrap();
    let output = one_hooks(&dir)
        .arg("guide")
        .write_stdin(
            serde_json::json!({
                "hook_event_name": "PreToolUse",
                "tool_name": "Write",
                "tool_input": {"file_path": "one/things/New Feature.md"}
            })
            .to_string(),
        )
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ctx = parsed["hookSpecificOutput"]["additionalContext"]
        .as_str()
        .unwrap();
    assert!(ctx.contains("Dimension: things"));
    assert!(ctx.contains("new-feature.md"));
}
