//! Relative neighbor shapes and wrap-aware resolution.

use crate::cell::Cell;
use crate::grid::Grid;
use indexmap::{IndexMap, IndexSet};
use ndca_core::{CellId, Coord, Dimension, ShapeError, MAX_AXES};

/// Resolved neighbors of one cell: offset to neighbor id.
///
/// Offsets whose target falls outside a non-wrapping edge are absent.
pub type NeighborMap = IndexMap<Coord, CellId>;

/// A reusable set of relative offsets.
///
/// A neighborhood knows nothing about any particular grid; the same value
/// can be resolved against grids of any size or wrap policy. Offsets keep
/// their insertion order and duplicates collapse.
///
/// # Examples
///
/// ```
/// use ndca_core::{Coord, Dimension};
/// use ndca_space::{Grid, Neighborhood};
///
/// let ring = Grid::new(vec![Dimension::new(5).wrapping()], 0u8).unwrap();
/// let left = Neighborhood::from_offsets([Coord::from([-1])]).unwrap();
///
/// let neighbors = left.resolve(&Coord::from([0]), &ring);
/// assert_eq!(neighbors[&Coord::from([-1])].position(), Coord::from([4]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    offsets: IndexSet<Coord>,
}

impl Neighborhood {
    /// Build from any list of offsets. Fails with [`ShapeError::Empty`] for
    /// an empty list.
    pub fn from_offsets<I>(offsets: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let offsets: IndexSet<Coord> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(ShapeError::Empty);
        }
        Ok(Self { offsets })
    }

    /// A shape with one offset.
    pub fn single(offset: Coord) -> Self {
        Self {
            offsets: IndexSet::from([offset]),
        }
    }

    /// Add `offset`. Returns `false` if it was already a member.
    pub fn insert(&mut self, offset: Coord) -> bool {
        self.offsets.insert(offset)
    }

    /// The 8 two-dimensional offsets at Chebyshev distance 1.
    pub fn moore() -> Self {
        Self::from_cube(2)
    }

    /// The 26 three-dimensional offsets at Chebyshev distance 1.
    pub fn moore_3d() -> Self {
        Self::from_cube(3)
    }

    /// The 4 two-dimensional orthogonal offsets.
    pub fn von_neumann() -> Self {
        Self {
            offsets: [[0, -1], [-1, 0], [1, 0], [0, 1]]
                .into_iter()
                .map(Coord::from)
                .collect(),
        }
    }

    fn from_cube(ndim: usize) -> Self {
        let mut offsets = IndexSet::new();
        let count = 3usize.pow(ndim as u32);
        for i in 0..count {
            let mut values = [0; MAX_AXES];
            let mut rest = i;
            // Last axis varies slowest so 2-D shapes read row by row.
            for v in values.iter_mut().take(ndim) {
                *v = (rest % 3) as i32 - 1;
                rest /= 3;
            }
            let c = Coord::from(values);
            if c != Coord::ORIGIN {
                offsets.insert(c);
            }
        }
        Self { offsets }
    }

    /// Extrude every offset over `start..=end` along `axes`.
    ///
    /// See [`Coord::extrude`]. Extruding the 8 Moore offsets over `-1..=1`
    /// on axis 2 gives the 24-offset layered shape used by 3-D life.
    pub fn extrude(&self, start: i32, end: i32, axes: &[usize]) -> Result<Self, ShapeError> {
        let mut offsets = IndexSet::new();
        for offset in &self.offsets {
            offsets.extend(offset.extrude(start, end, axes)?);
        }
        if offsets.is_empty() {
            return Err(ShapeError::Empty);
        }
        Ok(Self { offsets })
    }

    /// Union with `other`, keeping this shape's order first.
    pub fn combine(&self, other: &Neighborhood) -> Self {
        let mut offsets = self.offsets.clone();
        offsets.extend(other.offsets.iter().copied());
        Self { offsets }
    }

    /// The offsets in insertion order.
    pub fn offsets(&self) -> &IndexSet<Coord> {
        &self.offsets
    }

    /// Number of offsets.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always `false`: construction rejects empty shapes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `offset` is a member.
    pub fn contains(&self, offset: &Coord) -> bool {
        self.offsets.contains(offset)
    }

    // ── Resolution ──────────────────────────────────────────────

    /// Resolve each offset from `position` into a concrete cell.
    pub fn resolve<'g, S>(
        &self,
        position: &Coord,
        grid: &'g Grid<S>,
    ) -> IndexMap<Coord, &'g Cell<S>> {
        self.offsets
            .iter()
            .filter_map(|offset| {
                wrap_shifted(position, offset, grid.dimensions())
                    .and_then(|p| grid.cell(&p))
                    .map(|cell| (*offset, cell))
            })
            .collect()
    }

    /// Like [`resolve`](Self::resolve), writing ids into a reused map.
    pub fn resolve_into<S>(&self, position: &Coord, grid: &Grid<S>, out: &mut NeighborMap) {
        out.clear();
        for offset in &self.offsets {
            let id = wrap_shifted(position, offset, grid.dimensions())
                .and_then(|p| grid.cell_id(&p));
            if let Some(id) = id {
                out.insert(*offset, id);
            }
        }
    }

    /// Ids of the cells that have `position` among their resolved
    /// neighbors, once per offset that reaches it.
    ///
    /// Edge clamping is many-to-one, so a single offset can contribute a
    /// whole block of cells on a wrapping grid. This is the exact inverse
    /// of [`resolve_into`](Self::resolve_into) for every wrap policy.
    pub fn dependents<'a, S>(
        &'a self,
        position: Coord,
        grid: &'a Grid<S>,
    ) -> impl Iterator<Item = CellId> + 'a {
        self.offsets
            .iter()
            .flat_map(move |offset| sources(&position, offset, grid))
    }
}

/// Map `position` onto the grid described by `dimensions`.
///
/// An axis below 0 clamps to its last cell when it wraps at the start, and
/// an axis at or past its size clamps to 0 when it wraps at the end.
/// Returns `None` when an axis overflows a non-wrapping side, or when an
/// axis past the configured count is non-zero.
pub fn wrap_position(position: &Coord, dimensions: &[Dimension]) -> Option<Coord> {
    wrap_shifted(position, &Coord::ORIGIN, dimensions)
}

/// Resolve `position + offset`, summing each axis in `i64`.
fn wrap_shifted(position: &Coord, offset: &Coord, dimensions: &[Dimension]) -> Option<Coord> {
    let (position, offset) = (position.to_array(), offset.to_array());
    let mut values = [0; MAX_AXES];
    for (axis, v) in values.iter_mut().enumerate() {
        let sum = i64::from(position[axis]) + i64::from(offset[axis]);
        match dimensions.get(axis) {
            Some(d) => *v = d.resolve(sum)?,
            None if sum != 0 => return None,
            None => {}
        }
    }
    Some(Coord::from(values))
}

/// Every cell whose step by `offset` resolves to `target`.
fn sources<S>(target: &Coord, offset: &Coord, grid: &Grid<S>) -> Vec<CellId> {
    let dims = grid.dimensions();
    let (target, offset) = (target.to_array(), offset.to_array());
    if (dims.len()..MAX_AXES).any(|axis| target[axis] != 0 || offset[axis] != 0) {
        return Vec::new();
    }
    let choices: Vec<Vec<i32>> = dims
        .iter()
        .enumerate()
        .map(|(axis, d)| d.preimages(target[axis], offset[axis]).collect())
        .collect();
    if choices.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    // Odometer over the per-axis choices, axis 0 fastest.
    let mut out = Vec::new();
    let mut pick = [0usize; MAX_AXES];
    loop {
        let mut values = [0; MAX_AXES];
        for (axis, axis_choices) in choices.iter().enumerate() {
            values[axis] = axis_choices[pick[axis]];
        }
        if let Some(id) = grid.cell_id(&Coord::from(values)) {
            out.push(id);
        }

        let mut axis = 0;
        loop {
            if axis == choices.len() {
                return out;
            }
            pick[axis] += 1;
            if pick[axis] < choices[axis].len() {
                break;
            }
            pick[axis] = 0;
            axis += 1;
        }
    }
}
