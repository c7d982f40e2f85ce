//! History depth invariant: the undo stack never exceeds its cap.

use super::Invariant;
use crate::game::GameState;

/// Invariant: when a depth cap is configured, the history never holds
/// more snapshots than the cap allows.
///
/// Push-side eviction maintains this; a violation means snapshots were
/// inserted around the stack's API.
pub struct HistoryBoundedInvariant;

impl Invariant<GameState> for HistoryBoundedInvariant {
    fn holds(state: &GameState) -> bool {
        match state.history().limit() {
            Some(limit) => state.history().len() <= limit,
            None => true,
        }
    }

    fn description() -> &'static str {
        "History depth never exceeds the configured cap"
    }
}
