pub mod audit;
pub mod check;
pub mod cleanup;
pub mod context;
pub mod done;
pub mod guide;
pub mod imports;
pub mod knowledge;
pub mod ontology;
pub mod plan;
pub mod tag;

use hooks_core::hook::HookEvent;
use std::io::IsTerminal;

/// Read the hook event from stdin. Interactive runs (no piped event) and
/// malformed input both degrade to the default event; hooks never fail on
/// their own input.
pub(crate) fn stdin_event() -> HookEvent {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return HookEvent::default();
    }
    hooks_core::hook::read_event(stdin.lock()).unwrap_or_else(|e| {
        tracing::warn!("unreadable hook event: {e}");
        HookEvent::default()
    })
}
