use hooks_core::classify;
use hooks_core::hook::HookOutput;
use hooks_core::types::Dimension;
use std::fmt::Write as _;
use std::path::Path;

pub fn run() -> i32 {
    match try_run() {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("guide hook degraded: {e:#}");
            0
        }
    }
}

fn try_run() -> anyhow::Result<i32> {
    let event = super::stdin_event();
    let Some(file_path) = event.tool_input.file_path.clone() else {
        return Ok(0);
    };

    let classification = classify::classify(&file_path, event.tool_input.effective_content());
    let output = HookOutput::context("PreToolUse", render_guidance(&file_path, &classification));
    println!("{}", output.to_json()?);
    Ok(0)
}

fn render_guidance(file_path: &str, c: &classify::Classification) -> String {
    let file_name = Path::new(file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut msg = String::new();
    let _ = writeln!(msg, "Artifact placement guidance");
    let _ = writeln!(msg, "  Artifact: {file_name}");
    match c.dimension {
        Some(dim) => {
            let _ = writeln!(msg, "  Dimension: {dim} - {} (one/{dim}/)", dim.describe());
        }
        None => {
            let _ = writeln!(
                msg,
                "  Dimension: unmapped - documentation belongs under one/<dimension>/"
            );
            for dim in Dimension::all() {
                let _ = writeln!(msg, "    one/{dim}/ - {}", dim.describe());
            }
        }
    }
    if let Some(kind) = c.artifact {
        let _ = writeln!(msg, "  Artifact type: {kind}");
    }
    if !c.labels.is_empty() {
        let _ = writeln!(msg, "  Labels: {}", c.labels.join(", "));
    }
    if let Some(suggested) = &c.suggested_name {
        let _ = writeln!(
            msg,
            "  Naming: '{file_name}' is not kebab-case; suggest '{suggested}'"
        );
    }
    msg
}
