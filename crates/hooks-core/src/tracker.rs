use crate::error::Result;
use crate::io::atomic_write;
use crate::paths;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Lesson
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(alias = "inference", alias = "step")]
    pub cycle: u32,
    pub lesson: String,
    #[serde(default)]
    pub timestamp: i64,
}

// ---------------------------------------------------------------------------
// CycleState
// ---------------------------------------------------------------------------

/// Position in the 100-cycle workflow, persisted to
/// `.claude/state/cycle.json` between invocations. Older stores used
/// `inference`/`step` field spellings; serde aliases keep them loadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleState {
    #[serde(alias = "current_inference", alias = "current_step")]
    pub current_cycle: u32,
    /// Sorted, duplicate-free.
    #[serde(alias = "completed_inferences", alias = "completed_steps")]
    pub completed_cycles: Vec<u32>,
    #[serde(default = "default_feature")]
    pub feature_name: String,
    #[serde(default = "default_organization")]
    pub organization: String,
    #[serde(default = "default_role")]
    pub person_role: String,
    #[serde(default)]
    pub lessons_learned: Vec<Lesson>,
    #[serde(default)]
    pub feature_complete: bool,
}

fn default_feature() -> String {
    "New Feature".to_string()
}

fn default_organization() -> String {
    "Default Org".to_string()
}

fn default_role() -> String {
    "platform_owner".to_string()
}

impl Default for CycleState {
    fn default() -> Self {
        Self {
            current_cycle: 1,
            completed_cycles: Vec::new(),
            feature_name: default_feature(),
            organization: default_organization(),
            person_role: default_role(),
            lessons_learned: Vec::new(),
            feature_complete: false,
        }
    }
}

impl CycleState {
    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Load the state, materializing a default store on first read. A corrupt
    /// or unreadable store is treated as absent and reset; this never fails
    /// hard so hooks cannot block the assistant.
    pub fn load(root: &Path) -> CycleState {
        let path = paths::state_path(root);
        match std::fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<CycleState>(&data) {
                Ok(mut state) => {
                    state.current_cycle = state.current_cycle.clamp(1, 100);
                    state.completed_cycles.sort_unstable();
                    state.completed_cycles.dedup();
                    state
                }
                Err(e) => {
                    tracing::warn!("corrupt cycle state at {}: {e}; resetting", path.display());
                    Self::materialize(root)
                }
            },
            Err(_) => Self::materialize(root),
        }
    }

    fn materialize(root: &Path) -> CycleState {
        let state = CycleState::default();
        // First read materializes storage; a failed write only means the
        // next load re-initializes.
        let _ = state.save(root);
        state
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::state_path(root);
        let data = serde_json::to_string_pretty(self)?;
        atomic_write(&path, data.as_bytes())
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    /// Mark the current cycle complete and move on. Set semantics on
    /// `completed_cycles` make double-invocation on the same cycle safe;
    /// every call appends exactly one lesson record. Cycle 100 is absorbing:
    /// the counter stays put and `feature_complete` latches true.
    pub fn advance(&mut self, lesson: impl Into<String>) {
        let cycle = self.current_cycle;
        if let Err(pos) = self.completed_cycles.binary_search(&cycle) {
            self.completed_cycles.insert(pos, cycle);
        }
        self.lessons_learned.push(Lesson {
            cycle,
            lesson: lesson.into(),
            timestamp: Utc::now().timestamp(),
        });
        if self.current_cycle < 100 {
            self.current_cycle += 1;
        } else {
            self.feature_complete = true;
        }
    }

    // ---------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------

    pub fn completed_count(&self) -> usize {
        self.completed_cycles.len()
    }

    pub fn progress_percent(&self) -> u32 {
        (self.completed_cycles.len() as u32).min(100)
    }

    pub fn is_completed(&self, cycle: u32) -> bool {
        self.completed_cycles.binary_search(&cycle).is_ok()
    }

    /// The most recent lessons that aren't the auto-generated placeholder.
    pub fn meaningful_lessons(&self, limit: usize) -> Vec<&Lesson> {
        let lessons: Vec<&Lesson> = self
            .lessons_learned
            .iter()
            .filter(|l| l.lesson != placeholder_lesson(l.cycle))
            .collect();
        let skip = lessons.len().saturating_sub(limit);
        lessons.into_iter().skip(skip).collect()
    }
}

/// Default lesson text recorded when the caller supplies none.
pub fn placeholder_lesson(cycle: u32) -> String {
    format!("Completed cycle {cycle} successfully")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
