//! The [`Rule`] capability and its per-cell [`RuleContext`].
//!
//! A rule is one callback invoked per active cell per step. It reads the
//! committed states of the cell and its resolved neighbors, writes a pending
//! state, and may reach into any other cell of the grid.

use ndca_core::{CellId, Coord, TickId};
use ndca_space::{Cell, Grid, GridError, NeighborMap, Neighborhood};

/// A cell transition rule.
///
/// # Contract
///
/// - Invocation order within a step is unspecified. A rule must be
///   order-independent: read committed state only (which is all the
///   context exposes) and never depend on which cell ran first.
/// - Writes are pending until the step's global commit.
/// - A rule that writes to cells other than its own should expect those
///   cells to join the frontier on the next step.
///
/// Any `FnMut(&mut RuleContext<S, E>) + Send` closure is a rule; see
/// [`rule_fn`] for pinning a closure's signature.
///
/// # Examples
///
/// ```
/// use ndca_engine::{Rule, RuleContext};
///
/// /// Alive cells die; dead cells with any live neighbor become alive.
/// struct Flash;
///
/// impl Rule<u8> for Flash {
///     fn apply(&mut self, ctx: &mut RuleContext<'_, u8>) {
///         let next = match *ctx.state() {
///             1 => 0,
///             _ => ctx.neighbors().any(|(_, c)| *c.state() == 1) as u8,
///         };
///         ctx.set_state(next);
///     }
/// }
/// ```
pub trait Rule<S, E = ()>: Send {
    /// Compute the next state for `ctx`'s cell.
    fn apply(&mut self, ctx: &mut RuleContext<'_, S, E>);
}

impl<S, E, F> Rule<S, E> for F
where
    F: FnMut(&mut RuleContext<'_, S, E>) + Send,
{
    fn apply(&mut self, ctx: &mut RuleContext<'_, S, E>) {
        self(ctx)
    }
}

/// Identity helper that fixes a closure's argument type so its
/// higher-ranked lifetime is inferred.
pub fn rule_fn<S, E, F>(f: F) -> F
where
    F: FnMut(&mut RuleContext<'_, S, E>) + Send,
{
    f
}

/// What a rule sees for one cell.
///
/// All reads return committed state. [`set_state`](Self::set_state) and
/// [`set_state_at`](Self::set_state_at) write pending state, which no read
/// in the current step observes.
pub struct RuleContext<'a, S, E = ()> {
    grid: &'a mut Grid<S>,
    neighborhood: &'a Neighborhood,
    cell: CellId,
    neighbors: &'a NeighborMap,
    tick: TickId,
    events: Option<&'a mut Vec<E>>,
}

impl<'a, S: Clone + PartialEq, E> RuleContext<'a, S, E> {
    /// Construct a context.
    ///
    /// Called by the engine. For tests, resolve `neighbors` with
    /// [`Neighborhood::resolve_into`] first.
    pub fn new(
        grid: &'a mut Grid<S>,
        neighborhood: &'a Neighborhood,
        cell: CellId,
        neighbors: &'a NeighborMap,
        tick: TickId,
        events: Option<&'a mut Vec<E>>,
    ) -> Self {
        Self {
            grid,
            neighborhood,
            cell,
            neighbors,
            tick,
            events,
        }
    }

    /// Position of the cell being computed.
    pub fn position(&self) -> Coord {
        self.cell().position()
    }

    /// Id of the cell being computed.
    pub fn cell_id(&self) -> CellId {
        self.cell
    }

    /// The cell being computed.
    pub fn cell(&self) -> &Cell<S> {
        &self.grid[self.cell]
    }

    /// Committed state of the cell being computed.
    pub fn state(&self) -> &S {
        self.cell().state()
    }

    /// Pending state of the cell being computed.
    pub fn pending_state(&self) -> &S {
        self.cell().pending_state()
    }

    /// Write this cell's next state.
    pub fn set_state(&mut self, state: S) {
        self.grid[self.cell].set_state(state);
    }

    /// Resolved neighbors as `(offset, cell)` in neighborhood order.
    ///
    /// Offsets that fell off a non-wrapping edge are absent.
    pub fn neighbors(&self) -> impl Iterator<Item = (&Coord, &Cell<S>)> + '_ {
        let grid = &*self.grid;
        self.neighbors
            .iter()
            .map(move |(offset, id)| (offset, &grid[*id]))
    }

    /// The neighbor at `offset`, if it resolved to a cell.
    pub fn neighbor(&self, offset: &Coord) -> Option<&Cell<S>> {
        self.neighbors.get(offset).map(|id| &self.grid[*id])
    }

    /// Committed state of the neighbor at `offset`.
    pub fn neighbor_state(&self, offset: &Coord) -> Option<&S> {
        self.neighbor(offset).map(Cell::state)
    }

    /// Number of resolved neighbors.
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Offset-to-id map of resolved neighbors.
    pub fn neighbor_map(&self) -> &NeighborMap {
        self.neighbors
    }

    /// The whole grid, read-only.
    pub fn grid(&self) -> &Grid<S> {
        self.grid
    }

    /// The automaton's neighborhood shape.
    pub fn neighborhood(&self) -> &Neighborhood {
        self.neighborhood
    }

    /// Tick of the committed state being read.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Write the pending state of any cell.
    ///
    /// The target is committed with everything else at the end of the step
    /// and, if it changed, joins the frontier.
    pub fn set_state_at(&mut self, position: &Coord, state: S) -> Result<(), GridError> {
        self.grid.set_cell_value(position, state)
    }

    /// Push an event to the caller's queue. Dropped when the step was
    /// started with [`Automaton::step`](crate::Automaton::step).
    pub fn emit(&mut self, event: E) {
        if let Some(events) = self.events.as_deref_mut() {
            events.push(event);
        }
    }
}
