use crate::output::RULE;
use anyhow::Context as _;
use hooks_core::plan;
use hooks_core::tracker::{placeholder_lesson, CycleState};
use std::fmt::Write as _;
use std::path::Path;

pub fn run(root: &Path, lesson: Option<&str>) -> i32 {
    match try_run(root, lesson) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("done hook degraded: {e:#}");
            0
        }
    }
}

fn try_run(root: &Path, lesson: Option<&str>) -> anyhow::Result<i32> {
    let mut state = CycleState::load(root);
    let finished = state.current_cycle;
    let lesson = lesson
        .map(str::to_string)
        .unwrap_or_else(|| placeholder_lesson(finished));

    state.advance(lesson);
    state
        .save(root)
        .context("failed to persist cycle state")?;

    println!("{}", render_completion(&state, finished));
    Ok(0)
}

fn render_completion(state: &CycleState, finished: u32) -> String {
    let mut msg = String::new();

    if state.feature_complete {
        let _ = writeln!(msg, "{RULE}");
        let _ = writeln!(msg, "FEATURE COMPLETE: {}", state.feature_name);
        let _ = writeln!(msg, "{RULE}");
        let _ = writeln!(msg);
        let _ = writeln!(msg, "All 100 cycles completed.");
        let _ = writeln!(msg);
        let _ = writeln!(msg, "Organization:    {}", state.organization);
        let _ = writeln!(msg, "Person role:     {}", state.person_role);
        let _ = writeln!(msg, "Lessons learned: {}", state.lessons_learned.len());
        let _ = writeln!(msg);
        let _ = writeln!(msg, "Next steps:");
        let _ = writeln!(msg, "  1. Review lessons learned: /lessons");
        let _ = writeln!(msg, "  2. Start a new feature:    /one");
        let _ = writeln!(msg, "  3. Generate documentation: /document");
        let _ = writeln!(msg, "{RULE}");
        return msg;
    }

    let next = plan::describe(state.current_cycle);
    let _ = writeln!(msg, "{RULE}");
    let _ = writeln!(msg, "CYCLE COMPLETE: {finished}/100");
    let _ = writeln!(msg, "{RULE}");
    let _ = writeln!(msg);
    let _ = writeln!(
        msg,
        "Progress: {}/100 cycles complete ({}%)",
        state.completed_count(),
        state.progress_percent()
    );
    let _ = writeln!(msg, "Feature:  {}", state.feature_name);
    let _ = writeln!(msg);
    let _ = writeln!(msg, "{RULE}");
    let _ = writeln!(msg, "NEXT CYCLE: {}/100", state.current_cycle);
    let _ = writeln!(msg, "{RULE}");
    let _ = writeln!(msg);
    let _ = writeln!(msg, "Task:       {}", next.text);
    let _ = writeln!(
        msg,
        "Dimensions: {}",
        if next.dimensions.is_empty() {
            "Foundation".to_string()
        } else {
            next.dimensions
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    let _ = writeln!(
        msg,
        "Specialist: {}",
        next.specialist
            .map(|s| s.to_string())
            .unwrap_or_else(|| "director".to_string())
    );
    let _ = writeln!(msg);
    let _ = writeln!(msg, "Ready to continue? Type your next prompt, or:");
    let _ = writeln!(msg, "  /done - Mark this cycle complete (when finished)");
    let _ = writeln!(msg, "  /next - Skip to the next cycle (if not applicable)");
    let _ = writeln!(msg, "  /plan - View the complete 100-cycle plan");
    let _ = writeln!(msg, "{RULE}");
    msg
}
