use hooks_core::imports;
use hooks_core::types::Severity;
use std::path::Path;

/// Exit code the host treats as "block this operation".
const BLOCK: i32 = 2;

pub fn run() -> i32 {
    match try_run() {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("import validation degraded: {e:#}");
            0
        }
    }
}

fn try_run() -> anyhow::Result<i32> {
    let event = super::stdin_event();
    if !matches!(event.tool_name.as_str(), "" | "Write" | "Edit" | "MultiEdit") {
        return Ok(0);
    }
    let Some(file_path) = event.tool_input.file_path.clone() else {
        return Ok(0);
    };
    if !imports::is_checkable(&file_path) {
        return Ok(0);
    }

    // Write events carry the full content; for edits the file on disk has
    // already been modified.
    let content = match event.tool_input.effective_content() {
        Some(c) => c.to_string(),
        None => match std::fs::read_to_string(&file_path) {
            Ok(c) => c,
            Err(_) => return Ok(0),
        },
    };

    let findings = imports::validate(&file_path, &content);
    if findings.is_empty() {
        return Ok(0);
    }

    let file_name = Path::new(&file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if imports::has_errors(&findings) {
        println!("Import validation failed: {file_name}");
        for finding in &findings {
            let tag = match finding.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "warning",
            };
            println!("  {tag}: {}", finding.message);
        }
        return Ok(BLOCK);
    }

    println!("Import validation warnings: {file_name}");
    for finding in &findings {
        println!("  warning: {}", finding.message);
    }
    Ok(0)
}
