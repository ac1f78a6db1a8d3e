//! A single grid location and its state log.

use ndca_core::Coord;
use std::collections::VecDeque;

/// Per-cell history retention policy.
///
/// Every time a cell is visited by a step, its pre-tick committed state can
/// be appended to the cell's history. Recording is off unless asked for:
/// long-running simulations would otherwise grow without bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellHistory {
    /// Record nothing.
    #[default]
    Disabled,
    /// Record every visit, forever.
    Unbounded,
    /// Keep the `n` most recent entries, evicting the oldest first.
    Bounded(usize),
}

/// One grid location.
///
/// `state` is the last committed value. [`set_state`](Self::set_state) only
/// writes the pending value; the grid promotes pending to committed during
/// its commit sweep, so every rule invocation in a tick reads the same
/// committed neighborhood.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<S> {
    position: Coord,
    state: S,
    pending: S,
    changed: bool,
    history: VecDeque<S>,
}

impl<S: Clone + PartialEq> Cell<S> {
    /// A committed cell at `position` holding `state`.
    pub fn new(position: Coord, state: S) -> Self {
        Self {
            position,
            pending: state.clone(),
            state,
            changed: false,
            history: VecDeque::new(),
        }
    }

    /// Write the pending value.
    ///
    /// The change flag is recomputed against the committed state on every
    /// call, so writing `A` then writing the committed value back leaves the
    /// cell unchanged.
    pub fn set_state(&mut self, state: S) {
        self.changed = state != self.state;
        self.pending = state;
    }

    /// Append the committed state to the history log under `policy`.
    pub fn record_history(&mut self, policy: CellHistory) {
        match policy {
            CellHistory::Disabled => {}
            CellHistory::Unbounded => self.history.push_back(self.state.clone()),
            CellHistory::Bounded(limit) => {
                if limit == 0 {
                    return;
                }
                while self.history.len() >= limit {
                    self.history.pop_front();
                }
                self.history.push_back(self.state.clone());
            }
        }
    }

    /// Promote pending to committed. Returns whether the state changed.
    pub(crate) fn update_state(&mut self) -> bool {
        let changed = self.changed;
        if changed {
            self.state = self.pending.clone();
        }
        self.changed = false;
        changed
    }

    /// A fresh committed cell at the same position with the same state.
    pub(crate) fn snapshot(&self) -> Self {
        Self::new(self.position, self.state.clone())
    }
}

impl<S> Cell<S> {
    /// Where this cell lives.
    pub fn position(&self) -> Coord {
        self.position
    }

    /// The last committed state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The value that the next commit will install.
    pub fn pending_state(&self) -> &S {
        &self.pending
    }

    /// Whether the pending value differs from the committed one.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Previously recorded states, oldest first.
    pub fn history(&self) -> &VecDeque<S> {
        &self.history
    }
}
