//! The fixed-capacity [`Coord`] grid address.

use crate::error::ShapeError;
use std::fmt;
use std::ops::{Add, Index, Neg, Sub};

/// Engine-wide coordinate capacity.
///
/// Every [`Coord`] carries exactly this many axes regardless of the
/// dimensionality of the automaton it addresses; unused trailing axes are 0.
pub const MAX_AXES: usize = 8;

/// An immutable tuple of [`MAX_AXES`] signed integers.
///
/// Used both as an absolute grid position and as a relative neighborhood
/// offset. Equality, ordering, and hashing are elementwise over all axes, so
/// `Coord::from([1, 2])` and `Coord::from([1, 2, 0])` are the same value.
///
/// # Examples
///
/// ```
/// use ndca_core::Coord;
///
/// let a = Coord::from([1, 2]);
/// let b = Coord::new(&[3, -1]).unwrap();
/// assert_eq!(a + b, Coord::from([4, 1]));
/// assert_eq!(a.get(1), Some(2));
/// assert_eq!(a.with_element(2, 5).unwrap(), Coord::from([1, 2, 5]));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord([i32; MAX_AXES]);

impl Coord {
    /// The all-zero coordinate.
    pub const ORIGIN: Coord = Coord([0; MAX_AXES]);

    /// Build a coordinate from axis values, leading axes first.
    ///
    /// Fails with [`ShapeError::Empty`] for zero values and
    /// [`ShapeError::TooManyAxes`] for more than [`MAX_AXES`].
    pub fn new(values: &[i32]) -> Result<Self, ShapeError> {
        if values.is_empty() {
            return Err(ShapeError::Empty);
        }
        if values.len() > MAX_AXES {
            return Err(ShapeError::TooManyAxes {
                given: values.len(),
                max: MAX_AXES,
            });
        }
        let mut axes = [0; MAX_AXES];
        axes[..values.len()].copy_from_slice(values);
        Ok(Self(axes))
    }

    /// Value along `axis`, or `None` if `axis >= MAX_AXES`.
    pub fn get(&self, axis: usize) -> Option<i32> {
        self.0.get(axis).copied()
    }

    /// A copy of this coordinate with `axis` set to `value`.
    pub fn with_element(&self, axis: usize, value: i32) -> Result<Self, ShapeError> {
        if axis >= MAX_AXES {
            return Err(ShapeError::AxisOutOfRange {
                axis,
                max: MAX_AXES,
            });
        }
        let mut axes = self.0;
        axes[axis] = value;
        Ok(Self(axes))
    }

    /// One coordinate per depth in `start..=end`, each with every axis in
    /// `axes` set to that depth.
    ///
    /// This is how flat shapes gain depth: extruding the 2-D offset `(0, -1)`
    /// over `-1..=1` along axis 2 yields `(0, -1, -1)`, `(0, -1, 0)` and
    /// `(0, -1, 1)`. An empty range yields an empty list.
    pub fn extrude(&self, start: i32, end: i32, axes: &[usize]) -> Result<Vec<Self>, ShapeError> {
        if let Some(&axis) = axes.iter().find(|&&a| a >= MAX_AXES) {
            return Err(ShapeError::AxisOutOfRange {
                axis,
                max: MAX_AXES,
            });
        }
        Ok((start..=end)
            .map(|depth| {
                let mut values = self.0;
                for &axis in axes {
                    values[axis] = depth;
                }
                Self(values)
            })
            .collect())
    }

    /// The leading `n` axes as a slice (`n` is capped at [`MAX_AXES`]).
    pub fn axes(&self, n: usize) -> &[i32] {
        &self.0[..n.min(MAX_AXES)]
    }

    /// All [`MAX_AXES`] values.
    pub fn to_array(self) -> [i32; MAX_AXES] {
        self.0
    }

    /// Number of leading axes up to and including the last non-zero one.
    ///
    /// The origin reports 1 so that it still prints as `(0)`.
    pub fn significant_axes(&self) -> usize {
        self.0
            .iter()
            .rposition(|&v| v != 0)
            .map_or(1, |last| last + 1)
    }
}

impl<const N: usize> From<[i32; N]> for Coord {
    fn from(values: [i32; N]) -> Self {
        const { assert!(N >= 1 && N <= MAX_AXES, "coordinate arity must be 1..=MAX_AXES") };
        let mut axes = [0; MAX_AXES];
        axes[..N].copy_from_slice(&values);
        Self(axes)
    }
}

impl TryFrom<&[i32]> for Coord {
    type Error = ShapeError;

    fn try_from(values: &[i32]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<Coord> for [i32; MAX_AXES] {
    fn from(c: Coord) -> Self {
        c.0
    }
}

impl Index<usize> for Coord {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        &self.0[axis]
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        let mut axes = self.0;
        for (a, b) in axes.iter_mut().zip(rhs.0) {
            *a += b;
        }
        Coord(axes)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        let mut axes = self.0;
        for (a, b) in axes.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        Coord(axes)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord(self.0.map(|v| -v))
    }
}

/// Prints the significant axes only: `(1, 2)` rather than eight values.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.axes(self.significant_axes()).iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord{self}")
    }
}
