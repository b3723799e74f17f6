use hooks_core::ontology;

/// Exit code the host treats as "block this operation".
const BLOCK: i32 = 2;

pub fn run() -> i32 {
    match try_run() {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("ontology validation degraded: {e:#}");
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
    if !ontology::applies_to(&file_path) {
        return Ok(0);
    }

    let content = match event.tool_input.content.as_deref() {
        Some(c) => c.to_string(),
        None => match std::fs::read_to_string(&file_path) {
            Ok(c) => c,
            Err(_) => return Ok(0),
        },
    };

    let findings = ontology::validate(&file_path, &content);
    if findings.is_empty() {
        return Ok(0);
    }

    println!("Ontology validation failed: {file_path}");
    println!();
    for finding in &findings {
        if finding.line > 0 {
            println!("  {} (line {})", finding.message, finding.line);
        } else {
            println!("  {}", finding.message);
        }
    }
    println!();
    println!("Reference: one/knowledge/ontology.md");
    println!("Fix: use the type tables from the 6-dimension specification");
    Ok(BLOCK)
}
