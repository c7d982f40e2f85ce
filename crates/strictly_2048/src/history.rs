//! Undo history.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

/// An immutable copy of the observable state, captured before a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The grid as it was.
    pub(crate) grid: Grid,
    /// The score as it was.
    pub(crate) score: u32,
}

impl Snapshot {
    /// Captures a snapshot.
    pub fn new(grid: Grid, score: u32) -> Self {
        Self { grid, score }
    }

    /// Returns the captured grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the captured score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Consumes the snapshot, yielding the captured grid and score.
    pub fn into_parts(self) -> (Grid, u32) {
        (self.grid, self.score)
    }
}

/// Error produced when there is nothing to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HistoryError {
    /// The history holds no snapshots.
    #[display("History is empty: nothing to undo")]
    Empty,
}

impl std::error::Error for HistoryError {}

/// LIFO stack of snapshots with an optional depth cap.
///
/// Pushing at the cap silently evicts the oldest snapshot; undo depth
/// then equals the cap. A cap of zero disables history entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStack {
    pub(crate) snapshots: VecDeque<Snapshot>,
    pub(crate) limit: Option<usize>,
}

impl HistoryStack {
    /// Creates a history stack. `None` means unbounded depth.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit,
        }
    }

    /// Pushes a snapshot, evicting the oldest one at the cap.
    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            if self.snapshots.len() >= limit {
                self.snapshots.pop_front();
                debug!(limit, "evicted oldest snapshot at history cap");
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pops the newest snapshot. A failed pop changes nothing.
    pub fn pop(&mut self) -> Result<Snapshot, HistoryError> {
        self.snapshots.pop_back().ok_or(HistoryError::Empty)
    }

    /// Peeks at the newest snapshot without removing it.
    pub fn newest(&self) -> Option<&Snapshot> {
        self.snapshots.back()
    }

    /// Iterates over stored snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Checks whether the history holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the depth cap, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Drops all snapshots, keeping the cap.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: u32) -> Snapshot {
        Snapshot::new(Grid::new(2), score)
    }

    #[test]
    fn test_pops_in_lifo_order() {
        let mut history = HistoryStack::new(None);
        history.push(snapshot(1));
        history.push(snapshot(2));
        history.push(snapshot(3));
        assert_eq!(history.pop().unwrap().score(), 3);
        assert_eq!(history.pop().unwrap().score(), 2);
        assert_eq!(history.pop().unwrap().score(), 1);
        assert_eq!(history.pop(), Err(HistoryError::Empty));
    }

    #[test]
    fn test_empty_pop_fails_and_changes_nothing() {
        let mut history = HistoryStack::new(None);
        assert_eq!(history.pop(), Err(HistoryError::Empty));
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn test_cap_evicts_the_oldest_silently() {
        let mut history = HistoryStack::new(Some(2));
        history.push(snapshot(1));
        history.push(snapshot(2));
        history.push(snapshot(3));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().score(), 3);
        assert_eq!(history.pop().unwrap().score(), 2);
        assert_eq!(history.pop(), Err(HistoryError::Empty));
    }

    #[test]
    fn test_zero_cap_disables_history() {
        let mut history = HistoryStack::new(Some(0));
        history.push(snapshot(1));
        assert!(history.is_empty());
        assert_eq!(history.pop(), Err(HistoryError::Empty));
    }

    #[test]
    fn test_unbounded_history_keeps_everything() {
        let mut history = HistoryStack::new(None);
        for score in 0..32 {
            history.push(snapshot(score));
        }
        assert_eq!(history.len(), 32);
        assert_eq!(history.newest().unwrap().score(), 31);
    }

    #[test]
    fn test_clear_keeps_the_cap() {
        let mut history = HistoryStack::new(Some(3));
        history.push(snapshot(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.limit(), Some(3));
    }
}
