//! Test utilities for ndca development.
//!
//! Provides a brute-force [`full_sweep_step`] that visits every cell, used
//! as the reference the frontier stepper is checked against, plus rule
//! wrappers and seed patterns in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use ndca_core::{CellId, TickId};
use ndca_engine::{Rule, RuleContext};
use ndca_space::{Grid, NeighborMap, Neighborhood};

/// Step `grid` by running `rule` on every cell, then committing.
///
/// Returns the next grid and leaves `grid` untouched. This is the
/// definition of one tick that the frontier stepper must reproduce.
pub fn full_sweep_step<S, R>(
    grid: &Grid<S>,
    neighborhood: &Neighborhood,
    rule: &mut R,
    tick: TickId,
) -> Grid<S>
where
    S: Clone + PartialEq,
    R: Rule<S> + ?Sized,
{
    let mut next = grid.copy();
    let mut neighbors = NeighborMap::new();
    for index in 0..next.cell_count() {
        let id = CellId(index);
        let position = next[id].position();
        neighborhood.resolve_into(&position, &next, &mut neighbors);
        let mut ctx = RuleContext::new(&mut next, neighborhood, id, &neighbors, tick, None);
        rule.apply(&mut ctx);
    }
    next.update_grid_states();
    next
}

/// Committed states in grid order.
pub fn states<S: Clone>(grid: &Grid<S>) -> Vec<S> {
    grid.cells().map(|c| c.state().clone()).collect()
}
