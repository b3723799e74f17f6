use crate::output::RULE;
use hooks_core::hook::HookOutput;
use hooks_core::plan;
use hooks_core::tracker::CycleState;
use std::fmt::Write as _;
use std::path::Path;

pub fn run(root: &Path) -> i32 {
    match try_run(root) {
        Ok(code) => code,
        Err(e) => {
            tracing::warn!("context hook degraded: {e:#}");
            0
        }
    }
}

fn try_run(root: &Path) -> anyhow::Result<i32> {
    let event = super::stdin_event();

    // Workflow commands carry their own context
    if event.prompt.trim().starts_with('/') {
        return Ok(0);
    }

    let state = CycleState::load(root);
    let output = HookOutput::context("UserPromptSubmit", render_context(&state));
    println!("{}", output.to_json()?);
    Ok(0)
}

fn render_context(state: &CycleState) -> String {
    let current = state.current_cycle;
    let task = plan::describe(current);
    let phase = task.phase;
    let deps = plan::dependencies_for(current);
    let deps_met = deps.iter().filter(|d| state.is_completed(**d)).count();
    let parallel = plan::parallel_notes_for(current);

    let mut ctx = String::new();
    let _ = writeln!(ctx, "{RULE}");
    let _ = writeln!(ctx, "CURRENT CYCLE: {current}/100");
    let _ = writeln!(ctx, "{RULE}");
    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "Feature:      {}", state.feature_name);
    let _ = writeln!(ctx, "Organization: {}", state.organization);
    let _ = writeln!(ctx, "Person role:  {}", state.person_role);
    let _ = writeln!(ctx);
    let _ = writeln!(
        ctx,
        "Phase {}/10:   {} ({}/10)",
        phase.number,
        phase.name,
        plan::progress_in_phase(current)
    );
    let _ = writeln!(ctx, "Task:         {}", task.text);
    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "Dimensions:   {}", dimensions_line(&task));
    let _ = writeln!(
        ctx,
        "Specialist:   {}",
        task.specialist
            .map(|s| s.to_string())
            .unwrap_or_else(|| "director".to_string())
    );
    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "Dependencies met: {deps_met}/{}", deps.len());
    let _ = writeln!(
        ctx,
        "Progress:     {}/100 cycles complete ({}%)",
        state.completed_count(),
        state.progress_percent()
    );

    if !parallel.is_empty() {
        let _ = writeln!(ctx);
        let _ = writeln!(ctx, "Parallel opportunities: {}", parallel.join("; "));
    }

    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "{RULE}");
    let _ = writeln!(ctx, "NEXT 5 CYCLES");
    let _ = writeln!(ctx, "{RULE}");
    for n in current..=(current + 4).min(100) {
        let d = plan::describe(n);
        let marker = if state.is_completed(n) {
            "[x]"
        } else if n == current {
            "[>]"
        } else {
            "[ ]"
        };
        let _ = writeln!(ctx, "{marker} Cycle {n}: {}", d.text);
        if n == current {
            let _ = writeln!(ctx, "    phase: {}", d.phase.name);
            if !d.dimensions.is_empty() {
                let _ = writeln!(ctx, "    dimensions: {}", dimensions_line(&d));
            }
            if let Some(spec) = d.specialist {
                let _ = writeln!(ctx, "    specialist: {spec}");
            }
        } else {
            let _ = writeln!(
                ctx,
                "    {} | {}",
                dimensions_line(&d),
                d.specialist
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "director".to_string())
            );
        }
    }

    let lessons = state.meaningful_lessons(3);
    if !lessons.is_empty() {
        let _ = writeln!(ctx);
        let _ = writeln!(ctx, "RECENT LESSONS");
        for lesson in lessons {
            let _ = writeln!(ctx, "  - Cycle {}: {}", lesson.cycle, lesson.lesson);
        }
    }

    let _ = writeln!(ctx);
    let _ = writeln!(ctx, "WORKFLOW COMMANDS");
    let _ = writeln!(ctx, "  /done   - Mark current cycle complete and advance");
    let _ = writeln!(ctx, "  /next   - Skip to next cycle (if not applicable)");
    let _ = writeln!(ctx, "  /reset  - Start a new feature (back to cycle 1)");
    let _ = writeln!(ctx, "  /plan   - View the complete 100-cycle plan");
    let _ = writeln!(ctx, "{RULE}");

    ctx
}

fn dimensions_line(task: &plan::TaskDescriptor) -> String {
    if task.dimensions.is_empty() {
        "Foundation (all dimensions)".to_string()
    } else {
        task.dimensions
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_mentions_current_task() {
        let state = CycleState::default();
        let ctx = render_context(&state);
        assert!(ctx.contains("CURRENT CYCLE: 1/100"));
        assert!(ctx.contains("Validate idea against 6-dimension ontology"));
        assert!(ctx.contains("Foundation (all dimensions)"));
        assert!(ctx.contains("/done"));
    }

    #[test]
    fn context_window_clamps_at_100() {
        let state = CycleState {
            current_cycle: 99,
            ..CycleState::default()
        };
        let ctx = render_context(&state);
        assert!(ctx.contains("Cycle 100:"));
        assert!(!ctx.contains("Cycle 101"));
    }

    #[test]
    fn lessons_rendered_when_meaningful() {
        let mut state = CycleState::default();
        state.advance("prefer small diffs");
        let ctx = render_context(&state);
        assert!(ctx.contains("RECENT LESSONS"));
        assert!(ctx.contains("prefer small diffs"));
    }
}
