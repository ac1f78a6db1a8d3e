//! Reusable rules and seed patterns.
//!
//! - [`ShiftRule`]: copies the state found at a fixed offset.
//! - [`CountingRule`]: counts invocations of a wrapped rule.
//! - [`RecordingRule`]: logs every cell a wrapped rule is run on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use ndca_core::{Coord, TickId};
use ndca_engine::{Rule, RuleContext};

/// The five live cells of a glider whose bounding box starts at `(x, y)`.
///
/// With rows growing downward it travels by `(+1, +1)` every 4 ticks.
pub fn glider_at(x: i32, y: i32) -> Vec<(Coord, u8)> {
    [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        .into_iter()
        .map(|(dx, dy)| (Coord::from([x + dx, y + dy]), 1))
        .collect()
}

/// Each cell takes the state at `offset`, or keeps its own when `offset`
/// falls off the grid.
pub struct ShiftRule {
    pub offset: Coord,
}

impl ShiftRule {
    pub fn new(offset: Coord) -> Self {
        Self { offset }
    }
}

impl<S: Clone + PartialEq, E> Rule<S, E> for ShiftRule {
    fn apply(&mut self, ctx: &mut RuleContext<'_, S, E>) {
        if let Some(state) = ctx.neighbor_state(&self.offset).cloned() {
            ctx.set_state(state);
        }
    }
}

/// Counts how often the wrapped rule runs.
///
/// Keep a clone of [`calls`](Self::calls) before handing the rule to an
/// automaton.
pub struct CountingRule<R> {
    pub inner: R,
    pub calls: Arc<AtomicUsize>,
}

impl<R> CountingRule<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<S, E, R: Rule<S, E>> Rule<S, E> for CountingRule<R> {
    fn apply(&mut self, ctx: &mut RuleContext<'_, S, E>) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.apply(ctx);
    }
}

/// Shared log of `(tick, position)` visits.
pub type VisitLog = Arc<Mutex<Vec<(TickId, Coord)>>>;

/// Records every cell the wrapped rule is run on.
pub struct RecordingRule<R> {
    pub inner: R,
    visits: VisitLog,
}

impl<R> RecordingRule<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            visits: VisitLog::default(),
        }
    }

    pub fn visits(&self) -> VisitLog {
        Arc::clone(&self.visits)
    }
}

impl<S: Clone + PartialEq, E, R: Rule<S, E>> Rule<S, E> for RecordingRule<R> {
    fn apply(&mut self, ctx: &mut RuleContext<'_, S, E>) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((ctx.tick(), ctx.position()));
        self.inner.apply(ctx);
    }
}

/// Snapshot of a [`VisitLog`].
pub fn visited(log: &VisitLog) -> Vec<(TickId, Coord)> {
    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}
