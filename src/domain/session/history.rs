//! Bounded LIFO undo history over session snapshots.

use std::collections::VecDeque;

use super::SessionSnapshot;

/// Maximum number of recoverable pre-mutation snapshots.
pub const HISTORY_CAP: usize = 50;

/// A strict LIFO stack of pre-mutation snapshots, capped at
/// [`HISTORY_CAP`] entries with the oldest evicted first.
///
/// Every mutation that changes the visible result pushes the pre-mutation
/// snapshot before mutating; undo pops the most recent. There is no redo.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    entries: VecDeque<SessionSnapshot>,
}

impl UndoHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a pre-mutation snapshot, evicting the oldest entry when the
    /// cap is reached.
    pub fn push(&mut self, snapshot: SessionSnapshot) {
        if self.entries.len() == HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Pops the most recent snapshot. Returns None when empty.
    pub fn pop(&mut self) -> Option<SessionSnapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ProjectParams;

    fn snapshot_named(name: &str) -> SessionSnapshot {
        SessionSnapshot::initial(ProjectParams {
            name: name.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut history = UndoHistory::new();
        assert!(history.is_empty());
        assert!(history.pop().is_none());
    }

    #[test]
    fn pop_is_strictly_lifo() {
        let mut history = UndoHistory::new();
        history.push(snapshot_named("first"));
        history.push(snapshot_named("second"));
        history.push(snapshot_named("third"));

        assert_eq!(history.pop().unwrap().params.name, "third");
        assert_eq!(history.pop().unwrap().params.name, "second");
        assert_eq!(history.pop().unwrap().params.name, "first");
        assert!(history.pop().is_none());
    }

    #[test]
    fn push_beyond_cap_evicts_oldest() {
        let mut history = UndoHistory::new();
        for i in 0..HISTORY_CAP + 5 {
            history.push(snapshot_named(&format!("snap-{}", i)));
        }
        assert_eq!(history.len(), HISTORY_CAP);

        // The most recent 50 are recoverable, newest first.
        for i in (5..HISTORY_CAP + 5).rev() {
            assert_eq!(history.pop().unwrap().params.name, format!("snap-{}", i));
        }
        // snap-0 through snap-4 are permanently lost.
        assert!(history.pop().is_none());
    }
}
