use crate::output::print_json;
use hooks_core::plan;

pub fn run(cycle: Option<u32>, json: bool) -> anyhow::Result<i32> {
    match cycle {
        Some(n) => {
            let task = plan::describe(n);
            if json {
                print_json(&task)?;
            } else {
                println!("Cycle:      {}/100", task.cycle);
                println!("Task:       {}", task.text);
                println!(
                    "Phase:      {}/10 - {} ({}/10)",
                    task.phase.number,
                    task.phase.name,
                    plan::progress_in_phase(n)
                );
                println!(
                    "Dimensions: {}",
                    if task.dimensions.is_empty() {
                        "Foundation (all dimensions)".to_string()
                    } else {
                        task.dimensions
                            .iter()
                            .map(|d| d.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    }
                );
                println!(
                    "Specialist: {}",
                    task.specialist
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "director".to_string())
                );
                let deps = plan::dependencies_for(n);
                if !deps.is_empty() {
                    println!("Depends on: {} earlier cycles", deps.len());
                }
                for note in plan::parallel_notes_for(n) {
                    println!("Parallel:   {note}");
                }
            }
        }
        None => {
            if json {
                let all: Vec<_> = (1..=100).map(plan::describe).collect();
                print_json(&all)?;
            } else {
                for n in 1..=100u32 {
                    let task = plan::describe(n);
                    if plan::progress_in_phase(n) == 1 {
                        if n > 1 {
                            println!();
                        }
                        println!("Phase {}/10: {}", task.phase.number, task.phase.name);
                    }
                    println!(
                        "  {:>3}. {} [{}]",
                        n,
                        task.text,
                        task.specialist
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "director".to_string())
                    );
                }
            }
        }
    }
    Ok(0)
}
