use hooks_core::knowledge;
use hooks_core::tracker::CycleState;
use std::path::Path;

pub fn run(root: &Path) -> i32 {
    match try_run(root) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("knowledge hook degraded: {e:#}");
            0
        }
    }
}

fn try_run(root: &Path) -> anyhow::Result<i32> {
    let event = super::stdin_event();

    if !event.hook_event_name.is_empty() && event.hook_event_name != "PostToolUse" {
        return Ok(0);
    }
    let Some(file_path) = event.tool_input.file_path.clone() else {
        return Ok(0);
    };
    if !knowledge::should_record(&file_path, &event.tool_name) {
        return Ok(0);
    }

    let state = CycleState::load(root);
    let entry = knowledge::entry_for(&file_path, event.tool_input.effective_content(), &state);
    let dir = knowledge::log_dir()?;
    let log_file = knowledge::append(&dir, &entry)?;

    println!("Knowledge tagged");
    println!("   Artifact: {}", entry.file_name);
    println!("   Type:     {}", entry.artifact_type);
    let shown: Vec<&str> = entry.labels.iter().take(5).map(String::as_str).collect();
    let mut labels_line = shown.join(", ");
    if entry.labels.len() > 5 {
        labels_line.push_str(&format!(" (+{} more)", entry.labels.len() - 5));
    }
    println!("   Labels:   {labels_line}");
    println!("   Cycle:    {}/100", entry.cycle);
    if !entry.content_hash.is_empty() {
        println!("   Hash:     {}", entry.content_hash);
    }
    println!(
        "   Logged to {}",
        log_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    );
    Ok(0)
}
