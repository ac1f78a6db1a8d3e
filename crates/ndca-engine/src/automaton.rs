//! The stepping engine.
//!
//! [`Automaton`] owns the grid and the active frontier. A step visits only
//! frontier cells, commits the whole grid, then rebuilds the frontier from
//! what actually changed.

use std::time::Instant;

use indexmap::IndexSet;
use ndca_core::{CellId, Coord, TickId};
use ndca_space::{CellHistory, Grid, GridError, NeighborMap, Neighborhood};

use crate::config::{AutomatonConfig, ConfigError};
use crate::history::GridHistory;
use crate::metrics::StepMetrics;
use crate::rule::{Rule, RuleContext};

/// A cellular automaton with sparse active-frontier stepping.
///
/// # Lifecycle
///
/// Construct with [`new`](Self::new), seed with
/// [`initialize`](Self::initialize), then call [`step`](Self::step)
/// repeatedly. Stepping an automaton that was never initialized is allowed
/// and does nothing: the frontier is empty.
///
/// # Frontier
///
/// A step runs the rule on every active cell, drops cells that are
/// unchanged and see no changed neighbor, commits the whole grid, and then
/// activates each cell whose state changed together with every cell that
/// has it as a neighbor. Cells far from any change are never visited.
pub struct Automaton<S, E = ()> {
    grid: Grid<S>,
    neighborhood: Neighborhood,
    rule: Box<dyn Rule<S, E>>,
    active: IndexSet<CellId>,
    history: GridHistory<S>,
    retain_history: bool,
    cell_history: CellHistory,
    tick: TickId,
    last_metrics: StepMetrics,

    // Per-step scratch, reused across steps.
    frontier: Vec<CellId>,
    neighbors: NeighborMap,
    frontier_neighbors: Vec<CellId>,
    spans: Vec<usize>,
    changed: Vec<CellId>,
}

// Compile-time assertion: an automaton can be moved to another thread.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<Automaton<u8>>();
    assert::<Automaton<u32, String>>();
};

impl<S, E> Automaton<S, E>
where
    S: Clone + PartialEq + 'static,
    E: 'static,
{
    /// Build an automaton with every cell at `config.default_state`.
    ///
    /// Fails if [`AutomatonConfig::validate`] does.
    pub fn new<R>(
        config: AutomatonConfig<S>,
        neighborhood: Neighborhood,
        rule: R,
    ) -> Result<Self, ConfigError>
    where
        R: Rule<S, E> + 'static,
    {
        config.validate()?;
        let history_limit = config.grid_history_limit();
        let cell_history = config.cell_history;
        let grid = Grid::new(config.dimensions, config.default_state)?;
        Ok(Self {
            grid,
            neighborhood,
            rule: Box::new(rule),
            active: IndexSet::new(),
            history: GridHistory::new(history_limit.flatten()),
            retain_history: history_limit.is_some(),
            cell_history,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
            frontier: Vec::new(),
            neighbors: NeighborMap::new(),
            frontier_neighbors: Vec::new(),
            spans: Vec::new(),
            changed: Vec::new(),
        })
    }

    /// Seed the grid and commit the result as the current tick's state.
    ///
    /// Every position is checked before any cell is touched; the first
    /// out-of-range position fails the whole call with
    /// [`GridError::OutOfRange`] and leaves the automaton as it was.
    /// Each seeded cell and every cell that has it as a neighbor joins the
    /// frontier. Calling this again later layers new states on top of the
    /// current grid.
    pub fn initialize<I>(&mut self, initial: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = (Coord, S)>,
    {
        let initial: Vec<(Coord, S)> = initial.into_iter().collect();
        let ids = initial
            .iter()
            .map(|(position, _)| self.grid.check_bounds(position))
            .collect::<Result<Vec<_>, _>>()?;

        for ((_, state), &id) in initial.into_iter().zip(&ids) {
            self.grid[id].set_state(state);
        }
        for &id in &ids {
            activate(&mut self.active, &self.neighborhood, &self.grid, id);
        }
        self.changed.clear();
        self.grid.commit_into(&mut self.changed);
        log::trace!(
            "initialized {} cells at tick {} ({} changed, {} active)",
            ids.len(),
            self.tick,
            self.changed.len(),
            self.active.len()
        );
        Ok(())
    }

    /// Advance one tick, discarding any events the rule emits.
    ///
    /// Returns the live grid; it is the same grid every tick.
    pub fn step(&mut self) -> &Grid<S> {
        self.advance(None)
    }

    /// Advance one tick, appending emitted events to `events`.
    pub fn step_into(&mut self, events: &mut Vec<E>) -> &Grid<S> {
        self.advance(Some(events))
    }

    /// Advance `steps` ticks.
    pub fn run(&mut self, steps: u64) -> &Grid<S> {
        for _ in 0..steps {
            self.advance(None);
        }
        &self.grid
    }

    fn advance(&mut self, mut events: Option<&mut Vec<E>>) -> &Grid<S> {
        let started = Instant::now();

        // 1. Freeze the frontier; growth below must not feed this step.
        self.frontier.clear();
        self.frontier.extend(self.active.iter().copied());
        self.frontier_neighbors.clear();
        self.spans.clear();

        // 2. Resolve neighbors, record history, run the rule.
        for &id in &self.frontier {
            let position = self.grid[id].position();
            self.neighborhood
                .resolve_into(&position, &self.grid, &mut self.neighbors);
            self.frontier_neighbors
                .extend(self.neighbors.values().copied());
            self.spans.push(self.frontier_neighbors.len());
            self.grid[id].record_history(self.cell_history);

            let mut ctx = RuleContext::new(
                &mut self.grid,
                &self.neighborhood,
                id,
                &self.neighbors,
                self.tick,
                events.as_deref_mut(),
            );
            self.rule.apply(&mut ctx);
        }
        let rule_us = started.elapsed().as_micros() as u64;

        // 3. Drop cells that are quiet and see nothing changing.
        let mut start = 0;
        for (&id, &end) in self.frontier.iter().zip(&self.spans) {
            let grid = &self.grid;
            let quiet = !grid[id].is_changed()
                && self.frontier_neighbors[start..end]
                    .iter()
                    .all(|&n| !grid[n].is_changed());
            if quiet {
                self.active.swap_remove(&id);
            }
            start = end;
        }

        // 4. Commit everything, then grow from what changed.
        let commit_started = Instant::now();
        self.changed.clear();
        self.grid.commit_into(&mut self.changed);
        for &id in &self.changed {
            activate(&mut self.active, &self.neighborhood, &self.grid, id);
        }
        let commit_us = commit_started.elapsed().as_micros() as u64;
        self.tick = self.tick.next();

        // 5. Snapshot.
        let snapshot_started = Instant::now();
        if self.retain_history {
            self.history.push(self.tick, self.grid.copy());
        }
        let snapshot_us = snapshot_started.elapsed().as_micros() as u64;

        self.last_metrics = StepMetrics {
            total_us: started.elapsed().as_micros() as u64,
            rule_us,
            commit_us,
            snapshot_us,
            visited_cells: self.frontier.len(),
            changed_cells: self.changed.len(),
            active_cells: self.active.len(),
            history_len: self.history.len(),
        };
        log::debug!(
            "tick {}: visited {} changed {} active {} history {}",
            self.tick,
            self.last_metrics.visited_cells,
            self.last_metrics.changed_cells,
            self.last_metrics.active_cells,
            self.last_metrics.history_len
        );

        &self.grid
    }
}

impl<S, E> Automaton<S, E> {
    /// The live grid.
    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    /// The neighborhood shape.
    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    /// Ticks completed so far. The initial state is tick 0.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Retained grid snapshots. Always empty when history is disabled.
    pub fn history(&self) -> &GridHistory<S> {
        &self.history
    }

    /// The per-cell history policy.
    pub fn cell_history(&self) -> CellHistory {
        self.cell_history
    }

    /// Number of cells the next step will visit.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether the cell at `position` will be visited next step.
    pub fn is_active(&self, position: &Coord) -> bool {
        self.grid
            .cell_id(position)
            .is_some_and(|id| self.active.contains(&id))
    }

    /// Ids of the cells the next step will visit.
    pub fn active_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.active.iter().copied()
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

/// Add `id` and every cell that has it as a neighbor to the frontier.
fn activate<S>(
    active: &mut IndexSet<CellId>,
    neighborhood: &Neighborhood,
    grid: &Grid<S>,
    id: CellId,
) {
    active.insert(id);
    let position = grid[id].position();
    active.extend(neighborhood.dependents(position, grid));
}
