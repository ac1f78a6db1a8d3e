//! Error type for malformed coordinates and offset shapes.

use std::error::Error;
use std::fmt;

/// A coordinate or neighborhood shape was built with an invalid number of
/// axis values, or addressed an axis beyond the fixed capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// No axis values were supplied.
    Empty,
    /// More axis values were supplied than a [`Coord`](crate::Coord) can hold.
    TooManyAxes {
        /// Number of values supplied.
        given: usize,
        /// The engine-wide capacity ([`MAX_AXES`](crate::MAX_AXES)).
        max: usize,
    },
    /// An axis index at or beyond the fixed capacity.
    AxisOutOfRange {
        /// The offending axis index.
        axis: usize,
        /// The engine-wide capacity ([`MAX_AXES`](crate::MAX_AXES)).
        max: usize,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "at least one axis value is required"),
            Self::TooManyAxes { given, max } => {
                write!(f, "{given} axis values exceed the capacity of {max}")
            }
            Self::AxisOutOfRange { axis, max } => {
                write!(f, "axis {axis} is out of range (capacity {max})")
            }
        }
    }
}

impl Error for ShapeError {}
