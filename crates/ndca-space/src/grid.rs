//! Dense cell storage over a fixed set of dimensions.

use crate::cell::Cell;
use crate::error::GridError;
use indexmap::IndexMap;
use ndca_core::{describe_bounds, is_in_bounds, CellId, Coord, Dimension, MAX_AXES};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Every cell of an n-dimensional box, addressed by [`Coord`].
///
/// Storage is dense: one [`Cell`] per coordinate in the cartesian product of
/// the dimension sizes, created once and never added to or removed from.
/// Cells are kept in canonical order with axis 0 varying fastest, and a
/// cell's index in that order is its [`CellId`].
///
/// # Examples
///
/// ```
/// use ndca_core::{Coord, Dimension};
/// use ndca_space::Grid;
///
/// let mut grid = Grid::new(vec![Dimension::new(3), Dimension::new(2)], 0u8).unwrap();
/// assert_eq!(grid.cell_count(), 6);
///
/// grid.set_cell_value(&Coord::from([2, 1]), 7).unwrap();
/// assert_eq!(*grid.cell_value(&Coord::from([2, 1])).unwrap(), 0);
/// assert_eq!(grid.update_grid_states(), 1);
/// assert_eq!(*grid.cell_value(&Coord::from([2, 1])).unwrap(), 7);
///
/// assert!(grid.cell(&Coord::from([3, 0])).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Grid<S> {
    dimensions: Vec<Dimension>,
    cells: IndexMap<Coord, Cell<S>>,
}

impl<S: Clone + PartialEq> Grid<S> {
    /// Materialize every cell with `default_state`.
    ///
    /// Fails if `dimensions` is empty, longer than [`MAX_AXES`], contains a
    /// zero-size or oversize axis, or describes more cells than fit in memory
    /// addressing.
    pub fn new(dimensions: Vec<Dimension>, default_state: S) -> Result<Self, GridError> {
        let total = Self::validate_dimensions(&dimensions)?;
        let mut cells = IndexMap::with_capacity(total);
        let top = dimensions.len() - 1;
        enumerate(
            &dimensions,
            top,
            [0; MAX_AXES],
            &mut |position: Coord| {
                cells.insert(position, Cell::new(position, default_state.clone()));
            },
        );
        Ok(Self { dimensions, cells })
    }

    /// Produce an independent snapshot.
    ///
    /// The copy has the same dimensions and fresh cells holding each source
    /// cell's committed state; pending writes and per-cell history are not
    /// carried over. Cell ids are preserved.
    pub fn copy(&self) -> Self {
        Self {
            dimensions: self.dimensions.clone(),
            cells: self
                .cells
                .iter()
                .map(|(position, cell)| (*position, cell.snapshot()))
                .collect(),
        }
    }

    /// Commit every cell's pending state. Returns how many cells changed.
    ///
    /// The sweep covers the whole grid, not just cells a step visited,
    /// because rules may write to any cell.
    pub fn update_grid_states(&mut self) -> usize {
        self.cells
            .values_mut()
            .map(|cell| cell.update_state())
            .filter(|&changed| changed)
            .count()
    }

    /// Commit every cell and append the ids of those that changed to
    /// `changed`, in canonical order.
    pub fn commit_into(&mut self, changed: &mut Vec<CellId>) {
        for (index, cell) in self.cells.values_mut().enumerate() {
            if cell.update_state() {
                changed.push(CellId(index));
            }
        }
    }

    /// The committed state at `position`.
    pub fn cell_value(&self, position: &Coord) -> Result<&S, GridError> {
        self.cells
            .get(position)
            .map(Cell::state)
            .ok_or_else(|| self.out_of_range(position))
    }

    /// Write the pending state at `position`. Visible after the next commit.
    pub fn set_cell_value(&mut self, position: &Coord, state: S) -> Result<(), GridError> {
        match self.cells.get_mut(position) {
            Some(cell) => {
                cell.set_state(state);
                Ok(())
            }
            None => Err(self.out_of_range(position)),
        }
    }
}

impl<S> Grid<S> {
    /// Check a dimension list and return the total cell count it describes.
    pub fn validate_dimensions(dimensions: &[Dimension]) -> Result<usize, GridError> {
        if dimensions.is_empty() {
            return Err(GridError::NoDimensions);
        }
        if dimensions.len() > MAX_AXES {
            return Err(GridError::TooManyDimensions {
                given: dimensions.len(),
                max: MAX_AXES,
            });
        }
        let mut total: usize = 1;
        for (axis, d) in dimensions.iter().enumerate() {
            if d.size == 0 {
                return Err(GridError::EmptyDimension { axis });
            }
            if d.size > Dimension::MAX_SIZE {
                return Err(GridError::DimensionTooLarge { axis, size: d.size });
            }
            total = total
                .checked_mul(d.size as usize)
                .ok_or(GridError::CellCountOverflow)?;
        }
        Ok(total)
    }

    /// The configured dimensions.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `position` names a cell: every configured axis in range and
    /// every unused axis 0. Agrees with [`cell`](Self::cell).
    pub fn is_in_bounds(&self, position: &Coord) -> bool {
        is_in_bounds(position, &self.dimensions)
    }

    /// The id of the cell at `position`, or [`GridError::OutOfRange`].
    pub fn check_bounds(&self, position: &Coord) -> Result<CellId, GridError> {
        self.cell_id(position)
            .ok_or_else(|| self.out_of_range(position))
    }

    /// The cell at `position`, or `None` when there is no such cell.
    pub fn cell(&self, position: &Coord) -> Option<&Cell<S>> {
        self.cells.get(position)
    }

    /// Mutable access to the cell at `position`.
    pub fn cell_mut(&mut self, position: &Coord) -> Option<&mut Cell<S>> {
        self.cells.get_mut(position)
    }

    /// Stable id of the cell at `position`.
    pub fn cell_id(&self, position: &Coord) -> Option<CellId> {
        self.cells.get_index_of(position).map(CellId)
    }

    /// The cell with the given id.
    pub fn cell_by_id(&self, id: CellId) -> Option<&Cell<S>> {
        self.cells.get_index(id.0).map(|(_, cell)| cell)
    }

    /// Mutable access to the cell with the given id.
    pub fn cell_by_id_mut(&mut self, id: CellId) -> Option<&mut Cell<S>> {
        self.cells.get_index_mut(id.0).map(|(_, cell)| cell)
    }

    /// All cells in canonical order (axis 0 fastest).
    pub fn cells(&self) -> impl Iterator<Item = &Cell<S>> + '_ {
        self.cells.values()
    }

    fn out_of_range(&self, position: &Coord) -> GridError {
        GridError::OutOfRange {
            position: *position,
            bounds: describe_bounds(&self.dimensions),
        }
    }
}

/// Panics if `id` did not come from this grid (or a copy of it).
impl<S> Index<CellId> for Grid<S> {
    type Output = Cell<S>;

    fn index(&self, id: CellId) -> &Cell<S> {
        &self.cells[id.0]
    }
}

impl<S> IndexMut<CellId> for Grid<S> {
    fn index_mut(&mut self, id: CellId) -> &mut Cell<S> {
        &mut self.cells[id.0]
    }
}

/// Flattened single-line dump of committed states in canonical order.
impl<S: fmt::Display> fmt::Display for Grid<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells.values() {
            write!(f, "{}", cell.state())?;
        }
        Ok(())
    }
}

// ── Construction ────────────────────────────────────────────────

/// Depth-first walk of the cartesian product, outermost axis first, so that
/// axis 0 varies fastest in the emitted order.
fn enumerate(
    dimensions: &[Dimension],
    axis: usize,
    mut values: [i32; MAX_AXES],
    emit: &mut impl FnMut(Coord),
) {
    // Sizes were validated to fit i32.
    let size = dimensions[axis].size as i32;
    for v in 0..size {
        values[axis] = v;
        if axis == 0 {
            emit(Coord::from(values));
        } else {
            enumerate(dimensions, axis - 1, values, emit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellHistory;

    fn grid_3x2() -> Grid<u8> {
        Grid::new(vec![Dimension::new(3), Dimension::new(2)], 0).unwrap()
    }

    #[test]
    fn construction_materializes_cartesian_product() {
        let g = Grid::new(
            vec![Dimension::new(4), Dimension::new(3), Dimension::new(2)],
            0u8,
        )
        .unwrap();
        assert_eq!(g.cell_count(), 24);
        for x in 0..4 {
            for y in 0..3 {
                for z in 0..2 {
                    let p = Coord::from([x, y, z]);
                    assert_eq!(g.cell(&p).map(Cell::position), Some(p));
                }
            }
        }
    }

    #[test]
    fn canonical_order_axis0_fastest() {
        let g = grid_3x2();
        let order: Vec<Coord> = g.cells().map(Cell::position).collect();
        assert_eq!(order[0], Coord::from([0, 0]));
        assert_eq!(order[1], Coord::from([1, 0]));
        assert_eq!(order[3], Coord::from([0, 1]));
        for (i, p) in order.iter().enumerate() {
            assert_eq!(g.cell_id(p), Some(CellId(i)));
        }
    }

    #[test]
    fn invalid_dimensions_rejected() {
        assert_eq!(
            Grid::new(Vec::new(), 0u8).unwrap_err(),
            GridError::NoDimensions
        );
        assert_eq!(
            Grid::new(vec![Dimension::new(2), Dimension::new(0)], 0u8).unwrap_err(),
            GridError::EmptyDimension { axis: 1 }
        );
        assert!(matches!(
            Grid::new(vec![Dimension::new(1); MAX_AXES + 1], 0u8),
            Err(GridError::TooManyDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(vec![Dimension::new(u32::MAX)], 0u8),
            Err(GridError::DimensionTooLarge { axis: 0, .. })
        ));
    }

    #[test]
    fn lookup_out_of_range_is_none() {
        let g = grid_3x2();
        assert!(g.cell(&Coord::from([-1, 0])).is_none());
        assert!(g.cell(&Coord::from([0, 2])).is_none());
        // A non-zero unused axis has no cell either.
        assert!(g.cell(&Coord::from([0, 0, 1])).is_none());
    }

    #[test]
    fn bounds_check_agrees_with_lookup() {
        let g = grid_3x2();
        for x in -1..=3 {
            for y in -1..=2 {
                for z in [0, 1, -1] {
                    let p = Coord::from([x, y, z]);
                    assert_eq!(g.is_in_bounds(&p), g.cell(&p).is_some(), "{p}");
                    assert_eq!(g.is_in_bounds(&p), g.check_bounds(&p).is_ok(), "{p}");
                }
            }
        }
        assert!(!g.is_in_bounds(&Coord::from([0, 0, 1])));
    }

    #[test]
    fn direct_access_reports_position() {
        let mut g = grid_3x2();
        let p = Coord::from([5, 0]);
        let err = g.set_cell_value(&p, 1).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfRange {
                position: p,
                bounds: "[0, 3) x [0, 2)".to_string(),
            }
        );
        assert!(g.cell_value(&p).is_err());
        assert!(g.check_bounds(&p).is_err());
        assert_eq!(g.check_bounds(&Coord::from([2, 1])), Ok(CellId(5)));
    }

    #[test]
    fn commit_is_global() {
        let mut g = grid_3x2();
        g.set_cell_value(&Coord::from([0, 0]), 1).unwrap();
        g.set_cell_value(&Coord::from([2, 1]), 1).unwrap();
        let mut changed = Vec::new();
        g.commit_into(&mut changed);
        assert_eq!(changed, vec![CellId(0), CellId(5)]);
        assert_eq!(g.update_grid_states(), 0);
    }

    #[test]
    fn copy_takes_committed_state_only() {
        let mut g = grid_3x2();
        let p = Coord::from([1, 1]);
        g.set_cell_value(&p, 4).unwrap();
        g.update_grid_states();
        g.cell_mut(&p).unwrap().record_history(CellHistory::Unbounded);
        g.set_cell_value(&p, 9).unwrap();

        let snap = g.copy();
        assert_eq!(*snap.cell_value(&p).unwrap(), 4);
        assert!(!snap.cell(&p).unwrap().is_changed());
        assert!(snap.cell(&p).unwrap().history().is_empty());
        assert_eq!(snap.cell_id(&p), g.cell_id(&p));

        // Independent of later mutation.
        g.update_grid_states();
        assert_eq!(*snap.cell_value(&p).unwrap(), 4);
        assert_eq!(*g.cell_value(&p).unwrap(), 9);
    }

    #[test]
    fn display_flattens_axis0_fastest() {
        let mut g = grid_3x2();
        g.set_cell_value(&Coord::from([1, 0]), 1).unwrap();
        g.set_cell_value(&Coord::from([0, 1]), 2).unwrap();
        g.update_grid_states();
        assert_eq!(g.to_string(), "010200");
    }

    #[test]
    fn id_round_trip() {
        let mut g = grid_3x2();
        let id = g.cell_id(&Coord::from([2, 0])).unwrap();
        assert_eq!(g.cell_by_id(id).map(Cell::position), Some(Coord::from([2, 0])));
        g.cell_by_id_mut(id).unwrap().set_state(3);
        g.update_grid_states();
        assert_eq!(*g.cell_value(&Coord::from([2, 0])).unwrap(), 3);
        assert!(g.cell_by_id(CellId(6)).is_none());
        assert_eq!(g[id].position(), Coord::from([2, 0]));
    }
}
