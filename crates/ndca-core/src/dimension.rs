//! Per-axis extent and wrap policy.

use crate::coord::Coord;

/// The extent of one grid axis and how it treats out-of-range neighbors.
///
/// An axis with `wrap_start` maps positions below 0 back to the far end; an
/// axis with `wrap_end` maps positions at or past `size` back to the start.
/// The two flags are independent.
///
/// # Examples
///
/// ```
/// use ndca_core::Dimension;
///
/// let open = Dimension::new(48);
/// assert!(!open.wrap_start && !open.wrap_end);
///
/// let torus = Dimension::new(36).wrapping();
/// assert!(torus.wrap_start && torus.wrap_end);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Number of cells along the axis. Must be greater than 0.
    pub size: u32,
    /// Wrap positions below 0 to the end of the axis.
    pub wrap_start: bool,
    /// Wrap positions at or past `size` to the start of the axis.
    pub wrap_end: bool,
}

impl Dimension {
    /// Largest axis size: positions are `i32`, so `size` must fit.
    pub const MAX_SIZE: u32 = i32::MAX as u32;

    /// A non-wrapping axis with `size` cells.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            wrap_start: false,
            wrap_end: false,
        }
    }

    /// This axis with both wrap flags set (periodic boundary).
    pub fn wrapping(self) -> Self {
        self.with_wrap(true, true)
    }

    /// This axis with the given wrap flags.
    pub fn with_wrap(self, wrap_start: bool, wrap_end: bool) -> Self {
        Self {
            wrap_start,
            wrap_end,
            ..self
        }
    }

    /// Whether `value` lies in `[0, size)`.
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        value >= 0 && (value as i64) < self.size as i64
    }

    /// Resolve `value` under this axis's wrap policy.
    ///
    /// In-range values pass through. A value below 0 lands on the last cell
    /// when `wrap_start` is set, and a value at or past `size` lands on cell
    /// 0 when `wrap_end` is set. Any other out-of-range value resolves to
    /// `None` (no cell there).
    ///
    /// `value` is an `i64` so that a position plus an offset never
    /// overflows before it is resolved.
    #[inline]
    pub fn resolve(&self, value: i64) -> Option<i32> {
        let n = i64::from(self.size);
        if (0..n).contains(&value) {
            Some(value as i32)
        } else if value < 0 && self.wrap_start {
            Some((n - 1) as i32)
        } else if value >= n && self.wrap_end {
            Some(0)
        } else {
            None
        }
    }

    /// Every in-range `p` with `resolve(p + offset) == Some(target)`.
    ///
    /// Clamping to the opposite edge is many-to-one, so an edge cell can be
    /// reached from a whole run of positions. The yielded values are
    /// distinct and ascending.
    pub fn preimages(&self, target: i32, offset: i32) -> impl Iterator<Item = i32> {
        let n = i64::from(self.size);
        let (t, o) = (i64::from(target), i64::from(offset));
        let valid = self.contains(target);

        // Positions whose step fell below 0 and clamped onto the last cell.
        let below = if valid && self.wrap_start && t == n - 1 && o < 0 {
            0..(-o).min(n)
        } else {
            0..0
        };
        let direct = (valid && (0..n).contains(&(t - o))).then_some(t - o);
        // Positions whose step reached `size` and clamped onto cell 0.
        let above = if valid && self.wrap_end && t == 0 && o > 0 {
            (n - o).max(0)..n
        } else {
            0..0
        };

        below.chain(direct).chain(above).map(|p| p as i32)
    }
}

/// Whether `position` names a cell of a grid with these dimensions.
///
/// Every configured axis must lie in `[0, size)` and every axis past
/// `dimensions.len()` must be 0. A dimension list longer than
/// [`MAX_AXES`](crate::MAX_AXES) can never be satisfied.
pub fn is_in_bounds(position: &Coord, dimensions: &[Dimension]) -> bool {
    let configured = dimensions
        .iter()
        .enumerate()
        .all(|(axis, d)| position.get(axis).is_some_and(|v| d.contains(v)));
    configured && position.to_array().iter().skip(dimensions.len()).all(|&v| v == 0)
}

/// Human-readable bounds such as `"[0, 48) x [0, 48)"`, for error messages.
pub fn describe_bounds(dimensions: &[Dimension]) -> String {
    dimensions
        .iter()
        .map(|d| format!("[0, {})", d.size))
        .collect::<Vec<_>>()
        .join(" x ")
}
